//! Summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::Category;

/// Per-category subtotals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Tithe subtotal.
    pub tithe: Decimal,
    /// Offering subtotal.
    pub offering: Decimal,
    /// Visitor subtotal.
    pub visitor: Decimal,
}

impl CategoryTotals {
    /// Adds an amount to the bucket for `category`.
    pub fn add(&mut self, category: Category, amount: Decimal) {
        match category {
            Category::Tithe => self.tithe += amount,
            Category::Offering => self.offering += amount,
            Category::Visitor => self.visitor += amount,
        }
    }

    /// Returns the subtotal for `category`.
    #[must_use]
    pub const fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Tithe => self.tithe,
            Category::Offering => self.offering,
            Category::Visitor => self.visitor,
        }
    }
}

/// Aggregated donation totals over a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationSummary {
    /// Total for entries dated today.
    pub today: Decimal,
    /// Total for entries dated in the current month.
    pub current_month: Decimal,
    /// Lifetime total.
    pub lifetime: Decimal,
    /// Per-category subtotals for the current month.
    pub month_by_category: CategoryTotals,
    /// Per-category subtotals over the lifetime of the data.
    pub lifetime_by_category: CategoryTotals,
}
