use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::SummaryService;
use crate::entry::{Category, OwnEntry, PaymentMethod};

fn entry(id: i64, date: NaiveDate, amount: Decimal, category: Category) -> OwnEntry {
    OwnEntry {
        id,
        date,
        payer_name: "Contributor".to_string(),
        amount,
        payment_method: PaymentMethod::Cash,
        category,
        email: None,
        area_code: None,
        phone_number: None,
        operator: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_empty_listing_is_all_zeros() {
    let summary = SummaryService::summarize([], date(2026, 3, 15));
    assert_eq!(summary.today, Decimal::ZERO);
    assert_eq!(summary.current_month, Decimal::ZERO);
    assert_eq!(summary.lifetime, Decimal::ZERO);
    assert_eq!(summary.month_by_category.tithe, Decimal::ZERO);
}

#[test]
fn test_day_month_and_lifetime_totals() {
    // Two tithes today, one offering in a prior month.
    let today = date(2026, 3, 15);
    let entries = vec![
        entry(1, today, dec!(10.00), Category::Tithe),
        entry(2, today, dec!(15.00), Category::Tithe),
        entry(3, date(2026, 1, 10), dec!(100.00), Category::Offering),
    ];

    let summary = SummaryService::summarize(&entries, today);

    assert_eq!(summary.today, dec!(25.00));
    assert_eq!(summary.current_month, dec!(25.00));
    assert_eq!(summary.lifetime, dec!(125.00));
    assert_eq!(summary.month_by_category.tithe, dec!(25.00));
    assert_eq!(summary.month_by_category.offering, dec!(0.00));
    assert_eq!(summary.lifetime_by_category.offering, dec!(100.00));
    assert_eq!(summary.lifetime_by_category.visitor, dec!(0.00));
}

#[test]
fn test_same_month_different_day_counts_for_month_only() {
    let today = date(2026, 3, 15);
    let entries = vec![entry(1, date(2026, 3, 1), dec!(40.00), Category::Visitor)];

    let summary = SummaryService::summarize(&entries, today);

    assert_eq!(summary.today, Decimal::ZERO);
    assert_eq!(summary.current_month, dec!(40.00));
    assert_eq!(summary.month_by_category.visitor, dec!(40.00));
}

#[test]
fn test_same_month_of_other_year_does_not_count() {
    let today = date(2026, 3, 15);
    let entries = vec![entry(1, date(2025, 3, 15), dec!(40.00), Category::Tithe)];

    let summary = SummaryService::summarize(&entries, today);

    assert_eq!(summary.today, Decimal::ZERO);
    assert_eq!(summary.current_month, Decimal::ZERO);
    assert_eq!(summary.lifetime, dec!(40.00));
}

#[test]
fn test_many_small_amounts_sum_exactly() {
    // 0.10 a thousand times must be exactly 100.00, never 99.99something.
    let today = date(2026, 3, 15);
    let entries: Vec<OwnEntry> = (0..1000)
        .map(|i| entry(i, today, dec!(0.10), Category::Offering))
        .collect();

    let summary = SummaryService::summarize(&entries, today);

    assert_eq!(summary.today, dec!(100.00));
    assert_eq!(summary.lifetime, dec!(100.00));
}

proptest! {
    /// The lifetime total always equals the sum of the category subtotals,
    /// and month/day totals never exceed it.
    #[test]
    fn prop_totals_are_consistent(
        amounts in prop::collection::vec((1i64..100_000i64, 0u8..3u8, 0u32..28u32), 0..50)
    ) {
        let today = date(2026, 6, 28);
        let entries: Vec<OwnEntry> = amounts
            .iter()
            .enumerate()
            .map(|(i, &(cents, cat, day_offset))| {
                let category = match cat {
                    0 => Category::Tithe,
                    1 => Category::Offering,
                    _ => Category::Visitor,
                };
                let date = today - chrono::Days::new(u64::from(day_offset) * 7);
                entry(i64::try_from(i).unwrap(), date, Decimal::new(cents, 2), category)
            })
            .collect();

        let summary = SummaryService::summarize(&entries, today);

        let by_category = summary.lifetime_by_category.tithe
            + summary.lifetime_by_category.offering
            + summary.lifetime_by_category.visitor;
        prop_assert_eq!(summary.lifetime, by_category);
        prop_assert!(summary.current_month <= summary.lifetime);
        prop_assert!(summary.today <= summary.current_month);
    }
}
