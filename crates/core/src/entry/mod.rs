//! Donation entry domain types.
//!
//! Result rows are named structs, never positional tuples, and the presence
//! of the owner column is a type-level distinction: `OwnEntry` is what a
//! non-admin sees (no `created_by`), `AnyEntry` is the admin view.

pub mod validation;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use validation::split_phone;

/// Payment method for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Debit or credit card.
    Card,
    /// Bank transfer.
    Transfer,
    /// Check.
    Check,
    /// Pix instant payment.
    Pix,
}

impl PaymentMethod {
    /// Every payment method, in form-display order.
    pub const ALL: [Self; 5] = [
        Self::Cash,
        Self::Card,
        Self::Transfer,
        Self::Check,
        Self::Pix,
    ];

    /// Returns the canonical method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
            Self::Check => "check",
            Self::Pix => "pix",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "transfer" => Ok(Self::Transfer),
            "check" => Ok(Self::Check),
            "pix" => Ok(Self::Pix),
            _ => Err(format!("Unknown payment method: {s}")),
        }
    }
}

/// Contribution category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Tithe.
    Tithe,
    /// Offering.
    Offering,
    /// Visitor contribution.
    Visitor,
}

impl Category {
    /// Every category, in form-display order.
    pub const ALL: [Self; 3] = [Self::Tithe, Self::Offering, Self::Visitor];

    /// Returns the canonical category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tithe => "tithe",
            Self::Offering => "offering",
            Self::Visitor => "visitor",
        }
    }

    /// Returns the human-readable label used in receipts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tithe => "Tithe",
            Self::Offering => "Offering",
            Self::Visitor => "Visitor",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tithe" => Ok(Self::Tithe),
            "offering" => Ok(Self::Offering),
            "visitor" => Ok(Self::Visitor),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}

/// A donation entry as visible to its owner. Carries no owner column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnEntry {
    /// Stable identifier, assigned by the store.
    pub id: i64,
    /// Calendar date of the contribution.
    pub date: NaiveDate,
    /// Contributor name.
    pub payer_name: String,
    /// Contribution amount; always positive.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Contribution category.
    pub category: Category,
    /// Contact email, if supplied.
    pub email: Option<String>,
    /// Phone area code, if supplied.
    pub area_code: Option<String>,
    /// Phone subscriber number, if supplied.
    pub phone_number: Option<String>,
    /// Mobile carrier, informational only.
    pub operator: Option<String>,
}

/// A donation entry as visible to administrators, including who recorded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyEntry {
    /// The entry fields common to every view.
    #[serde(flatten)]
    pub entry: OwnEntry,
    /// Username of the user who recorded the entry.
    pub created_by: String,
}

/// A role-dependent listing result.
///
/// Non-admin callers get `Own` rows without the owner column; admin callers
/// get `All` rows from every owner, with `created_by` exposed.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryListing {
    /// Rows restricted to one owner; the owner column is not present.
    Own(Vec<OwnEntry>),
    /// Rows from all owners, with the owner column.
    All(Vec<AnyEntry>),
}

impl EntryListing {
    /// Returns the number of rows in the listing.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Own(rows) => rows.len(),
            Self::All(rows) => rows.len(),
        }
    }

    /// Returns true if the listing has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the common entry fields regardless of variant.
    pub fn records(&self) -> Box<dyn Iterator<Item = &OwnEntry> + '_> {
        match self {
            Self::Own(rows) => Box::new(rows.iter()),
            Self::All(rows) => Box::new(rows.iter().map(|row| &row.entry)),
        }
    }
}

/// Phone contact supplied with a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhoneInput {
    /// Area code and subscriber number supplied separately.
    Parts {
        /// Area code (DDD).
        area_code: String,
        /// Subscriber number without the area code.
        number: String,
    },
    /// A single formatted phone string, e.g. `"(11) 98765-4321"`.
    Formatted(String),
    /// No phone supplied.
    #[default]
    None,
}

impl PhoneInput {
    /// Resolves the input into stored `(area_code, phone_number)` fields.
    ///
    /// A formatted string is split into area code (first 2 digits) and
    /// subscriber number only when it carries at least 11 digits; shorter
    /// inputs silently leave both fields empty rather than erroring.
    #[must_use]
    pub fn into_fields(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Parts { area_code, number } => (Some(area_code), Some(number)),
            Self::Formatted(raw) => match split_phone(&raw) {
                Some((area_code, number)) => (Some(area_code), Some(number)),
                None => (None, None),
            },
            Self::None => (None, None),
        }
    }
}

/// Input for creating an entry. The owner is supplied separately by the
/// session, never by the caller.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Calendar date of the contribution.
    pub date: NaiveDate,
    /// Contributor name, already validated.
    pub payer_name: String,
    /// Contribution amount; always positive.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Contribution category.
    pub category: Category,
    /// Contact email, if supplied.
    pub email: Option<String>,
    /// Phone contact, if supplied.
    pub phone: PhoneInput,
    /// Mobile carrier, informational only.
    pub operator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trips() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_phone_input_parts_pass_through() {
        let phone = PhoneInput::Parts {
            area_code: "11".to_string(),
            number: "987654321".to_string(),
        };
        assert_eq!(
            phone.into_fields(),
            (Some("11".to_string()), Some("987654321".to_string()))
        );
    }

    #[test]
    fn test_phone_input_formatted_splits() {
        let phone = PhoneInput::Formatted("(11) 98765-4321".to_string());
        assert_eq!(
            phone.into_fields(),
            (Some("11".to_string()), Some("987654321".to_string()))
        );
    }

    #[test]
    fn test_phone_input_short_formatted_is_dropped() {
        let phone = PhoneInput::Formatted("4321".to_string());
        assert_eq!(phone.into_fields(), (None, None));
    }

    #[test]
    fn test_phone_input_none() {
        assert_eq!(PhoneInput::None.into_fields(), (None, None));
    }
}
