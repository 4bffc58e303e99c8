use crate::filter::Filter;
use crate::loader::LoadOptions;
use crate::report::ReportSelection;
use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;

pub struct Args {
    /// Input file, `None` for standard input.
    pub input: Option<String>,
    pub options: LoadOptions,
    pub selection: ReportSelection,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(&Self::app().get_matches())
    }

    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::app().get_matches_from_safe(args)?;
        Ok(Self::from_matches(&matches))
    }

    fn app() -> App<'static, 'static> {
        App::new("ledger_report")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Read a list of dated amounts and report on it.")
            .after_help("With no FILE, or when FILE is -, read standard input.")
            .arg(
                Arg::with_name("account")
                    .short("a")
                    .long("account")
                    .takes_value(true)
                    .value_name("ACCOUNT")
                    .help("only read entries for ACCOUNT"),
            )
            .arg(
                Arg::with_name("from-date")
                    .short("f")
                    .long("from-date")
                    .takes_value(true)
                    .value_name("DATE")
                    .help("only read entries with dates >= DATE"),
            )
            .arg(
                Arg::with_name("to-date")
                    .short("t")
                    .long("to-date")
                    .takes_value(true)
                    .value_name("DATE")
                    .help("only read entries with dates <= DATE"),
            )
            .arg(
                Arg::with_name("date")
                    .short("d")
                    .long("date")
                    .takes_value(true)
                    .value_name("DATE")
                    .help("only read entries with dates matching DATE"),
            )
            .arg(
                Arg::with_name("invert-amounts")
                    .short("i")
                    .long("invert-amounts")
                    .help("invert the sign of all amounts"),
            )
            .arg(
                Arg::with_name("list-by-account")
                    .short("A")
                    .long("list-by-account")
                    .help("list the results grouped by account"),
            )
            .arg(
                Arg::with_name("list-by-date")
                    .short("D")
                    .long("list-by-date")
                    .help("list the results grouped by date"),
            )
            .arg(
                Arg::with_name("list-total")
                    .short("T")
                    .long("list-total")
                    .help("list the total amount"),
            )
            .arg(
                Arg::with_name("list-details")
                    .long("list-details")
                    .help("list all the details (default)"),
            )
            .arg(Arg::with_name("FILE").help("ledger file to read"))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let mut filter = Filter::new();
        if let Some(account) = matches.value_of("account") {
            filter = filter.account(account);
        }

        // Date options apply in the order they were given, so a later
        // --from-date or --to-date narrows an earlier --date.
        let mut dates: Vec<(usize, &str, &str)> = ["date", "from-date", "to-date"]
            .iter()
            .filter_map(|name| {
                let index = matches.index_of(name)?;
                let value = matches.value_of(name)?;
                Some((index, *name, value))
            })
            .collect();
        dates.sort_by_key(|(index, _, _)| *index);

        for (_, name, value) in dates {
            filter = match name {
                "date" => filter.exact_date(value),
                "from-date" => filter.from_date(value),
                _ => filter.to_date(value),
            };
        }

        let selection = ReportSelection {
            details: matches.is_present("list-details"),
            by_account: matches.is_present("list-by-account"),
            by_date: matches.is_present("list-by-date"),
            total: matches.is_present("list-total"),
        };

        Self {
            input: matches
                .value_of("FILE")
                .filter(|path| *path != "-")
                .map(str::to_string),
            options: LoadOptions {
                filter,
                invert_amounts: matches.is_present("invert-amounts"),
            },
            selection: selection.or_details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn should_default_to_details_from_standard_input() {
        let args = parse(&["ledger_report"]);

        assert_eq!(args.input, None);
        assert_eq!(args.options, LoadOptions::default());
        assert_eq!(
            args.selection,
            ReportSelection {
                details: true,
                ..ReportSelection::default()
            }
        );
    }

    #[test]
    fn should_read_standard_input_for_dash() {
        assert_eq!(parse(&["ledger_report", "-"]).input, None);
        assert_eq!(
            parse(&["ledger_report", "books.txt"]).input,
            Some("books.txt".to_string())
        );
    }

    #[test]
    fn should_build_filter_and_options() {
        let args = parse(&[
            "ledger_report",
            "-a",
            "42",
            "--from-date",
            "2020",
            "-t",
            "202012",
            "-i",
        ]);

        assert_eq!(
            args.options,
            LoadOptions {
                filter: Filter::new().account("42").from_date("2020").to_date("202012"),
                invert_amounts: true,
            }
        );
    }

    #[test]
    fn should_set_both_bounds_for_exact_date() {
        let args = parse(&["ledger_report", "-d", "20230101"]);

        assert_eq!(args.options.filter, Filter::new().exact_date("20230101"));
    }

    #[test]
    fn should_apply_date_options_in_the_order_given() {
        // A later bound overrides one side of an exact date.
        let args = parse(&["ledger_report", "-d", "2023", "-f", "2022"]);
        assert_eq!(
            args.options.filter,
            Filter::new().from_date("2022").to_date("2023")
        );

        // A later exact date overrides both bounds.
        let args = parse(&["ledger_report", "-f", "2022", "-t", "2024", "--date", "2023"]);
        assert_eq!(args.options.filter, Filter::new().exact_date("2023"));
    }

    #[test]
    fn should_select_report_sections() {
        let args = parse(&["ledger_report", "-T", "-A", "-D"]);

        assert_eq!(
            args.selection,
            ReportSelection {
                details: false,
                by_account: true,
                by_date: true,
                total: true,
            }
        );

        let args = parse(&["ledger_report", "--list-details", "-T"]);
        assert!(args.selection.details && args.selection.total);
    }
}
