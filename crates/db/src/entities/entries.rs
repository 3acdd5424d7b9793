//! `SeaORM` Entity for the entries table.
//!
//! `amount_cents` holds the contribution amount in integer cents; the SQLite
//! driver has no native decimal type, and the repository converts to
//! `Decimal` at the boundary so domain code never sees cents.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entry_date: Date,
    pub payer_name: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub category: String,
    pub created_by: String,
    pub email: Option<String>,
    pub area_code: Option<String>,
    pub phone_number: Option<String>,
    pub operator: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
