use env_logger::Env;
use ledger_report::args::Args;
use ledger_report::loader::{load_entries, LoadOptions, Loaded};
use ledger_report::report::write_reports;
use ledger_report::store::EntryStore;
use log::{error, Level};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "{}: {}", level_label(record.level()), record.args()))
        .init();

    let args = Args::parse();
    let mut status = 0;

    // An unreadable input still produces the (empty) reports.
    let store = match load(args.input.as_deref(), &args.options) {
        Ok(loaded) => {
            if loaded.error.is_some() {
                status = 1;
            }
            loaded.store
        }
        Err(err) => {
            error!(
                "failed to open {}: {}",
                args.input.as_deref().unwrap_or("standard input"),
                err
            );
            status = 1;
            EntryStore::new()
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(err) = write_reports(&mut out, &store, args.selection) {
        error!("{}", err);
        status = 1;
    }

    process::exit(status);
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn load(path: Option<&str>, options: &LoadOptions) -> io::Result<Loaded> {
    let input: Box<dyn BufRead> = match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    Ok(load_entries(input, options))
}
