use crate::entry::{bounded, Entry, ACCOUNT_LEN, DATE_LEN};
use std::cmp::Ordering;

/// Selects which entries are loaded into the store.
///
/// Date bounds are inclusive and compared on the bound's own length, so a
/// bound of `2023` matches every date starting with `2023`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    account: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: &str) -> Self {
        self.account = non_empty(account, ACCOUNT_LEN);
        self
    }

    pub fn from_date(mut self, date: &str) -> Self {
        self.from_date = non_empty(date, DATE_LEN);
        self
    }

    pub fn to_date(mut self, date: &str) -> Self {
        self.to_date = non_empty(date, DATE_LEN);
        self
    }

    /// Restricts both bounds to the same (possibly partial) date.
    pub fn exact_date(self, date: &str) -> Self {
        self.from_date(date).to_date(date)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(account) = &self.account {
            if account != entry.account() {
                return false;
            }
        }

        if let Some(from) = &self.from_date {
            if compare_prefix(entry.date(), from) == Ordering::Less {
                return false;
            }
        }

        if let Some(to) = &self.to_date {
            if compare_prefix(entry.date(), to) == Ordering::Greater {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &str, max: usize) -> Option<String> {
    match bounded(value, max) {
        "" => None,
        value => Some(value.to_string()),
    }
}

/// Compares `date` against `bound`, looking at no more than `bound.len()`
/// bytes of `date`.
fn compare_prefix(date: &str, bound: &str) -> Ordering {
    let date = date.as_bytes();
    let prefix = &date[..date.len().min(bound.len())];
    prefix.cmp(bound.as_bytes())
}
