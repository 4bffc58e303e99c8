//! Report sections computed from an [`EntryStore`].
//!
//! Every section is a single forward pass over the store. The itemized and
//! per-account sections rely on the store being sorted by account to find
//! where one account ends and the next begins.

use crate::errors::ReportError;
use crate::store::EntryStore;
use log::debug;
use std::io::Write;

/// Which report sections to print. Sections always come out in the order of
/// the fields, whatever order they were asked for in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReportSelection {
    pub details: bool,
    pub by_account: bool,
    pub by_date: bool,
    pub total: bool,
}

impl ReportSelection {
    /// Falls back to the itemized listing when nothing was selected.
    pub fn or_details(self) -> Self {
        if self == Self::default() {
            Self {
                details: true,
                ..self
            }
        } else {
            self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccountTotal<'a> {
    pub account: &'a str,
    pub amount: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateTotal<'a> {
    pub date: &'a str,
    pub amount: f32,
}

/// One total per account, in account order.
pub fn account_totals(store: &EntryStore) -> Vec<AccountTotal<'_>> {
    store
        .groups()
        .map(|group| AccountTotal {
            account: group.account,
            amount: group.total(),
        })
        .collect()
}

/// One total per distinct date, in date order. Entries from different
/// accounts on the same date are added together.
pub fn date_totals(store: &EntryStore) -> Vec<DateTotal<'_>> {
    let mut totals: Vec<DateTotal> = Vec::new();

    for entry in store {
        let date = entry.date();

        // Entries come grouped by account, so dates restart at every new
        // account and only the fast path can skip the search.
        let position = match totals.last() {
            None => Err(0),
            Some(last) if last.date < date => Err(totals.len()),
            Some(_) => totals.binary_search_by(|total| total.date.cmp(date)),
        };

        match position {
            Ok(index) => totals[index].amount += entry.amount(),
            Err(index) => {
                if totals.try_reserve(1).is_err() {
                    debug!("no room to total date {}, skipping it", date);
                    continue;
                }
                totals.insert(
                    index,
                    DateTotal {
                        date,
                        amount: entry.amount(),
                    },
                );
            }
        }
    }

    totals
}

pub fn grand_total(store: &EntryStore) -> f32 {
    store.iter().fold(0.0f32, |total, entry| total + entry.amount())
}

/// Lists every entry under its account, each account closed by its
/// subtotal. Prints nothing for an empty store.
pub fn write_details<W: Write>(out: &mut W, store: &EntryStore) -> Result<(), ReportError> {
    for group in store.groups() {
        writeln!(out, "{:<3}", group.account)?;

        let mut subtotal = 0.0f32;
        for entry in group.entries {
            subtotal += entry.amount();
            writeln!(
                out,
                "{:>8} {:7.2} {:<58}",
                entry.date(),
                entry.amount(),
                entry.description()
            )?;
        }

        writeln!(out, "total    {:7.2}", subtotal)?;
        writeln!(out)?;
    }

    Ok(())
}

pub fn write_by_account<W: Write>(out: &mut W, store: &EntryStore) -> Result<(), ReportError> {
    for total in account_totals(store) {
        writeln!(out, "{:<3}      {:7.2}", total.account, total.amount)?;
    }

    Ok(())
}

pub fn write_by_date<W: Write>(out: &mut W, store: &EntryStore) -> Result<(), ReportError> {
    for total in date_totals(store) {
        writeln!(out, "{:>8} {:7.2}", total.date, total.amount)?;
    }

    Ok(())
}

/// Always prints exactly one line, a zero total for an empty store.
pub fn write_total<W: Write>(out: &mut W, store: &EntryStore) -> Result<(), ReportError> {
    writeln!(out, "total    {:7.2}", grand_total(store))?;

    Ok(())
}

/// Writes the selected sections in their fixed order.
pub fn write_reports<W: Write>(
    out: &mut W,
    store: &EntryStore,
    selection: ReportSelection,
) -> Result<(), ReportError> {
    let selection = selection.or_details();

    if selection.details {
        write_details(out, store)?;
    }
    if selection.by_account {
        write_by_account(out, store)?;
    }
    if selection.by_date {
        write_by_date(out, store)?;
    }
    if selection.total {
        write_total(out, store)?;
    }

    out.flush()?;
    Ok(())
}
