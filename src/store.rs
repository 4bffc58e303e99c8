use crate::entry::Entry;
use crate::errors::StoreError;
use std::slice;

/// Number of entries the backing storage grows by when it is full.
pub const GROWTH_STEP: usize = 10;

/// Holds entries sorted by account, then date. Entries with the same account
/// and date keep the order in which they were inserted.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    limit: Option<usize>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses to hold more than `limit` entries, as if its
    /// storage could not grow any further.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Inserts an entry at its sorted position and returns that position.
    ///
    /// If the storage cannot grow the entry is dropped and the entries already
    /// stored are left as they were.
    pub fn insert(&mut self, entry: Entry) -> Result<usize, StoreError> {
        if self.limit.map_or(false, |limit| self.entries.len() >= limit) {
            return Err(StoreError::OutOfMemory);
        }
        if self.entries.len() == self.entries.capacity() {
            self.entries
                .try_reserve_exact(GROWTH_STEP)
                .map_err(|_| StoreError::OutOfMemory)?;
        }

        // First position whose key is strictly greater, i.e. after every
        // entry with an equal key.
        let index = self
            .entries
            .partition_point(|stored| stored.key() <= entry.key());
        self.entries.insert(index, entry);

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Walks the store one account at a time.
    pub fn groups(&self) -> AccountGroups<'_> {
        AccountGroups {
            rest: &self.entries,
        }
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The consecutive run of entries sharing one account.
#[derive(Debug, PartialEq)]
pub struct AccountGroup<'a> {
    pub account: &'a str,
    pub entries: &'a [Entry],
}

impl AccountGroup<'_> {
    pub fn total(&self) -> f32 {
        self.entries
            .iter()
            .fold(0.0f32, |total, entry| total + entry.amount())
    }
}

/// Iterator over the account groups of an [`EntryStore`]. A group ends where
/// the account differs from the previous entry's, which is only correct
/// because the store is sorted by account.
pub struct AccountGroups<'a> {
    rest: &'a [Entry],
}

impl<'a> Iterator for AccountGroups<'a> {
    type Item = AccountGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let account = self.rest.first()?.account();
        let end = self
            .rest
            .iter()
            .position(|entry| entry.account() != account)
            .unwrap_or(self.rest.len());

        let (entries, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(AccountGroup { account, entries })
    }
}
