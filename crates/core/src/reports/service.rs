//! Summary calculation.

use chrono::{Datelike, NaiveDate};

use super::types::DonationSummary;
use crate::entry::OwnEntry;

/// Service for computing donation summaries.
pub struct SummaryService;

impl SummaryService {
    /// Computes day/month/lifetime totals and per-category breakdowns.
    ///
    /// An entry counts toward `today` on an exact day match and toward the
    /// current month on a year+month match against `today`. All sums are
    /// decimal-exact.
    #[must_use]
    pub fn summarize<'a, I>(entries: I, today: NaiveDate) -> DonationSummary
    where
        I: IntoIterator<Item = &'a OwnEntry>,
    {
        let mut summary = DonationSummary::default();

        for entry in entries {
            summary.lifetime += entry.amount;
            summary.lifetime_by_category.add(entry.category, entry.amount);

            if Self::same_month(entry.date, today) {
                summary.current_month += entry.amount;
                summary.month_by_category.add(entry.category, entry.amount);
            }

            if entry.date == today {
                summary.today += entry.amount;
            }
        }

        summary
    }

    fn same_month(date: NaiveDate, today: NaiveDate) -> bool {
        date.year() == today.year() && date.month() == today.month()
    }
}
