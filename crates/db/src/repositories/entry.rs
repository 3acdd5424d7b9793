//! Entry repository for donation entry database operations.
//!
//! Every operation is a single auto-committing statement over the entries
//! table. Row visibility is decided by `ListScope`: non-admin callers must
//! scope to their own username and receive rows without the owner column.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::entries;
use offertory_core::access::Role;
use offertory_core::entry::{AnyEntry, Category, EntryListing, NewEntry, OwnEntry, PaymentMethod};

/// Error types for entry store operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The amount cannot be represented in integer cents.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(Decimal),

    /// A stored row no longer parses into the domain types.
    #[error("corrupt row {id}: {reason}")]
    CorruptRow {
        /// Row identifier.
        id: i64,
        /// What failed to parse.
        reason: String,
    },

    /// Underlying store I/O failure.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Row visibility for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Only rows created by this username; the owner column stays hidden.
    Owned(String),
    /// Rows from every owner, with the owner column exposed. Admin only.
    All,
}

impl ListScope {
    /// Derives the scope for a session. Non-admin roles are always scoped to
    /// their own rows.
    #[must_use]
    pub fn for_session(role: Role, username: &str) -> Self {
        if role.can_administer() {
            Self::All
        } else {
            Self::Owned(username.to_string())
        }
    }
}

/// Input for replacing the mutable fields of an entry.
///
/// `id`, `created_by`, and `created_at` are deliberately not representable
/// here.
#[derive(Debug, Clone)]
pub struct UpdateEntryInput {
    /// New entry date.
    pub date: NaiveDate,
    /// New contributor name.
    pub payer_name: String,
    /// New amount.
    pub amount: Decimal,
    /// New payment method.
    pub payment_method: PaymentMethod,
    /// New category.
    pub category: Category,
    /// New contact email.
    pub email: Option<String>,
    /// New phone area code.
    pub area_code: Option<String>,
    /// New phone subscriber number.
    pub phone_number: Option<String>,
    /// New carrier.
    pub operator: Option<String>,
}

/// Entry repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new entry and returns its assigned id.
    ///
    /// Never fails on logically-valid input; the only error sources are the
    /// underlying store and an amount too large for integer cents.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, entry: NewEntry, created_by: &str) -> Result<i64, EntryError> {
        let (area_code, phone_number) = entry.phone.into_fields();

        let model = entries::ActiveModel {
            entry_date: Set(entry.date),
            payer_name: Set(entry.payer_name),
            amount_cents: Set(to_cents(entry.amount)?),
            payment_method: Set(entry.payment_method.as_str().to_string()),
            category: Set(entry.category.as_str().to_string()),
            created_by: Set(created_by.to_string()),
            email: Set(entry.email),
            area_code: Set(area_code),
            phone_number: Set(phone_number),
            operator: Set(entry.operator),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await?;
        Ok(inserted.id)
    }

    /// Lists entries visible under `scope`, ordered by date descending then
    /// id descending (newest insert first for same-day entries).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn list(&self, scope: ListScope) -> Result<EntryListing, EntryError> {
        let mut query = entries::Entity::find();

        if let ListScope::Owned(ref owner) = scope {
            query = query.filter(entries::Column::CreatedBy.eq(owner.as_str()));
        }

        let rows = query
            .order_by_desc(entries::Column::EntryDate)
            .order_by_desc(entries::Column::Id)
            .all(&self.db)
            .await?;

        match scope {
            ListScope::Owned(_) => {
                let entries = rows.into_iter().map(own_entry).collect::<Result<_, _>>()?;
                Ok(EntryListing::Own(entries))
            }
            ListScope::All => {
                let entries = rows.into_iter().map(any_entry).collect::<Result<_, _>>()?;
                Ok(EntryListing::All(entries))
            }
        }
    }

    /// Gets an entry by id, with the owner column.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<AnyEntry>, EntryError> {
        let row = entries::Entity::find_by_id(id).one(&self.db).await?;
        row.map(any_entry).transpose()
    }

    /// Replaces the mutable fields of an entry.
    ///
    /// Returns `false` when `id` does not exist. The UI always picks from a
    /// live list, so a miss is a race guard, not an expected path.
    /// `created_by` and `created_at` are never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(&self, id: i64, fields: UpdateEntryInput) -> Result<bool, EntryError> {
        let Some(existing) = entries::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut active: entries::ActiveModel = existing.into();
        active.entry_date = Set(fields.date);
        active.payer_name = Set(fields.payer_name);
        active.amount_cents = Set(to_cents(fields.amount)?);
        active.payment_method = Set(fields.payment_method.as_str().to_string());
        active.category = Set(fields.category.as_str().to_string());
        active.email = Set(fields.email);
        active.area_code = Set(fields.area_code);
        active.phone_number = Set(fields.phone_number);
        active.operator = Set(fields.operator);

        active.update(&self.db).await?;
        Ok(true)
    }

    /// Permanently deletes an entry.
    ///
    /// Idempotent: a missing id returns `false`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: i64) -> Result<bool, EntryError> {
        let result = entries::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

fn to_cents(amount: Decimal) -> Result<i64, EntryError> {
    amount
        .round_dp(2)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(EntryError::AmountOutOfRange(amount))
}

fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn own_entry(model: entries::Model) -> Result<OwnEntry, EntryError> {
    let payment_method: PaymentMethod =
        model
            .payment_method
            .parse()
            .map_err(|reason| EntryError::CorruptRow {
                id: model.id,
                reason,
            })?;
    let category: Category = model
        .category
        .parse()
        .map_err(|reason| EntryError::CorruptRow {
            id: model.id,
            reason,
        })?;

    Ok(OwnEntry {
        id: model.id,
        date: model.entry_date,
        payer_name: model.payer_name,
        amount: from_cents(model.amount_cents),
        payment_method,
        category,
        email: model.email,
        area_code: model.area_code,
        phone_number: model.phone_number,
        operator: model.operator,
    })
}

fn any_entry(model: entries::Model) -> Result<AnyEntry, EntryError> {
    let created_by = model.created_by.clone();
    let entry = own_entry(model)?;
    Ok(AnyEntry { entry, created_by })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cents_round_trip() {
        assert_eq!(to_cents(dec!(10.50)).unwrap(), 1050);
        assert_eq!(to_cents(dec!(0.01)).unwrap(), 1);
        assert_eq!(from_cents(1050), dec!(10.50));
        assert_eq!(from_cents(1), dec!(0.01));
    }

    #[test]
    fn test_cents_rounds_excess_precision() {
        // Sub-cent precision rounds to the nearest cent.
        assert_eq!(to_cents(dec!(10.004)).unwrap(), 1000);
        assert_eq!(to_cents(dec!(10.006)).unwrap(), 1001);
    }

    #[test]
    fn test_cents_out_of_range() {
        let huge = Decimal::MAX;
        assert!(matches!(
            to_cents(huge),
            Err(EntryError::AmountOutOfRange(_))
        ));
    }

    #[test]
    fn test_scope_for_session() {
        assert_eq!(
            ListScope::for_session(Role::Admin, "treasurer"),
            ListScope::All
        );
        assert_eq!(
            ListScope::for_session(Role::Editor, "deacon01"),
            ListScope::Owned("deacon01".to_string())
        );
        assert_eq!(
            ListScope::for_session(Role::Viewer, "deacon02"),
            ListScope::Owned("deacon02".to_string())
        );
    }
}
