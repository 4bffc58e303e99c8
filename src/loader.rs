use crate::entry::Entry;
use crate::errors::LoadError;
use crate::filter::Filter;
use crate::reader::{LineReader, MAX_LINE_LEN};
use crate::store::EntryStore;
use log::{debug, error, warn};
use std::io::BufRead;

/// How lines become entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadOptions {
    pub filter: Filter,
    /// Negate every amount before it is filtered and stored.
    pub invert_amounts: bool,
}

/// A line that was longer than [`MAX_LINE_LEN`] and was cut.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Truncation {
    pub line: usize,
    pub length: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadSummary {
    pub lines: usize,
    pub accepted: usize,
    /// Lines that are not entries: empty, comments or malformed.
    pub rejected: usize,
    /// Entries left out by the filter.
    pub filtered: usize,
    /// Entries the store could not take.
    pub dropped: usize,
    pub truncations: Vec<Truncation>,
}

/// The result of a load: whatever could be stored, along with what happened
/// to the rest of the input.
#[derive(Debug)]
pub struct Loaded {
    pub store: EntryStore,
    pub summary: LoadSummary,
    /// Set when reading stopped early because the input failed.
    pub error: Option<LoadError>,
}

/// Reads every line of `input` into a new store.
///
/// Nothing here is fatal. Malformed lines are skipped, long lines are parsed
/// from their first [`MAX_LINE_LEN`] bytes and an entry the store cannot
/// take is dropped. A read error stops the load and is reported in
/// [`Loaded::error`] next to the entries read so far.
pub fn load_entries<R: BufRead>(input: R, options: &LoadOptions) -> Loaded {
    load_into(EntryStore::new(), input, options)
}

/// Like [`load_entries`], adding to an existing store.
pub fn load_into<R: BufRead>(mut store: EntryStore, input: R, options: &LoadOptions) -> Loaded {
    let mut summary = LoadSummary::default();
    let mut failure = None;

    for line in LineReader::new(input) {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("{}", err);
                failure = Some(err);
                break;
            }
        };
        summary.lines += 1;

        if line.is_truncated() {
            warn!(
                "the line at {} is longer ({}) than we can handle ({}) and has been truncated",
                line.number, line.length, MAX_LINE_LEN
            );
            summary.truncations.push(Truncation {
                line: line.number,
                length: line.length,
            });
        }

        let mut entry = match Entry::parse(&line.text) {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping line {}: {}", line.number, err);
                summary.rejected += 1;
                continue;
            }
        };

        if options.invert_amounts {
            entry.invert();
        }

        if !options.filter.matches(&entry) {
            summary.filtered += 1;
            continue;
        }

        match store.insert(entry) {
            Ok(_) => summary.accepted += 1,
            Err(err) => {
                debug!("dropping line {}: {}", line.number, err);
                summary.dropped += 1;
            }
        }
    }

    debug!(
        "loaded {} of {} lines ({} rejected, {} filtered, {} dropped)",
        summary.accepted, summary.lines, summary.rejected, summary.filtered, summary.dropped
    );

    Loaded {
        store,
        summary,
        error: failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Read};

    const LEDGER: &str = "\
# date    account amount description
20230101 ABC 100.00 groceries
20230102 ABC 50.00 rent
20230101 XYZ 20.00 coffee
not a transaction
";

    fn load(input: &str, options: &LoadOptions) -> Loaded {
        load_entries(input.as_bytes(), options)
    }

    #[test]
    fn should_load_entries_in_sorted_order() {
        let loaded = load(LEDGER, &LoadOptions::default());

        let keys: Vec<(&str, &str)> = loaded.store.iter().map(Entry::key).collect();
        assert_eq!(
            keys,
            vec![
                ("ABC", "20230101"),
                ("ABC", "20230102"),
                ("XYZ", "20230101")
            ]
        );
        assert!(loaded.error.is_none());
        assert_eq!(
            loaded.summary,
            LoadSummary {
                lines: 5,
                accepted: 3,
                rejected: 2,
                ..LoadSummary::default()
            }
        );
    }

    #[test]
    fn should_load_the_sample_ledger() {
        let loaded = load(include_str!("../data/sample.ledger"), &LoadOptions::default());

        assert_eq!(loaded.store.len(), 5);
        assert_eq!(loaded.summary.rejected, 1);
        assert_eq!(loaded.store.entries()[2].description(), "refund");
    }

    #[test]
    fn should_only_load_the_selected_account() {
        let input = "\
20200101 42 1.00 a
20200101 420 2.00 b
20200102 42 3.00 c
20200103 7 4.00 d
";
        let options = LoadOptions {
            filter: Filter::new().account("42"),
            ..LoadOptions::default()
        };
        let loaded = load(input, &options);

        assert_eq!(loaded.store.len(), 2);
        assert!(loaded.store.iter().all(|entry| entry.account() == "42"));
        assert_eq!(loaded.summary.filtered, 2);
    }

    #[test]
    fn should_only_load_the_selected_dates() {
        let input = "\
20191231 ABC 1.00 too early
20200101 ABC 2.00 first day
20200701 XYZ 3.00 mid year
20201231 ABC 4.00 last day
20210101 XYZ 5.00 too late
";
        let options = LoadOptions {
            filter: Filter::new().from_date("20200101").to_date("20201231"),
            ..LoadOptions::default()
        };
        let loaded = load(input, &options);

        let dates: Vec<&str> = loaded.store.iter().map(Entry::date).collect();
        assert_eq!(dates, vec!["20200101", "20201231", "20200701"]);
        assert!(loaded
            .store
            .iter()
            .all(|entry| entry.date() >= "20200101" && entry.date() <= "20201231"));
    }

    #[test]
    fn should_invert_every_amount() {
        let options = LoadOptions {
            invert_amounts: true,
            ..LoadOptions::default()
        };
        let loaded = load(LEDGER, &options);

        let amounts: Vec<f32> = loaded.store.iter().map(Entry::amount).collect();
        assert_eq!(amounts, vec![-100.0, -50.0, -20.0]);

        // Inverting the inverted amounts gives the original ones back.
        let original = load(LEDGER, &LoadOptions::default());
        for (inverted, original) in loaded.store.iter().zip(original.store.iter()) {
            let mut twice = inverted.clone();
            twice.invert();
            assert_eq!(&twice, original);
        }
    }

    #[test]
    fn should_warn_about_and_still_parse_truncated_lines() {
        let long = format!("20230101 ABC 12.50 {}", "x".repeat(131));
        assert_eq!(long.len(), 150);
        let input = format!("# header\n{}\n", long);

        let loaded = load(&input, &LoadOptions::default());

        assert_eq!(
            loaded.summary.truncations,
            vec![Truncation {
                line: 2,
                length: 150
            }]
        );
        assert_eq!(loaded.store.len(), 1);

        let entry = &loaded.store.entries()[0];
        assert_eq!(entry.amount(), 12.5);
        assert_eq!(entry.description(), "x".repeat(79));
    }

    #[test]
    fn should_count_rejected_lines_in_line_numbers() {
        let long = format!("{}\n", "#".repeat(120));
        let input = format!("\n\n{}", long);

        let loaded = load(&input, &LoadOptions::default());

        assert_eq!(loaded.summary.truncations[0].line, 3);
        assert!(loaded.store.is_empty());
    }

    #[test]
    fn should_count_entries_the_store_declines() {
        let loaded = load_into(EntryStore::with_limit(2), LEDGER.as_bytes(), &LoadOptions::default());

        // Loading goes on past the refused entry and keeps what fit.
        assert_eq!(loaded.store.len(), 2);
        assert_eq!(loaded.summary.accepted, 2);
        assert_eq!(loaded.summary.dropped, 1);
        assert_eq!(loaded.summary.rejected, 2);
        assert!(loaded.error.is_none());

        let keys: Vec<(&str, &str)> = loaded.store.iter().map(Entry::key).collect();
        assert_eq!(keys, vec![("ABC", "20230101"), ("ABC", "20230102")]);
    }

    #[test]
    fn should_keep_entries_read_before_an_input_error() {
        struct FailingReader {
            data: &'static [u8],
        }

        impl Read for FailingReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.data.is_empty() {
                    return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
                }
                self.data.read(buf)
            }
        }

        let reader = BufReader::new(FailingReader {
            data: b"20230101 ABC 1.00 a\n20230102 ABC 2.00 b\n",
        });
        let loaded = load_entries(reader, &LoadOptions::default());

        assert_eq!(loaded.store.len(), 2);
        assert!(matches!(loaded.error, Some(LoadError::Io(_))));
    }
}
