//! Initial migration: the entries table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ENTRIES_SQL).await?;
        db.execute_unprepared(
            "CREATE INDEX idx_entries_owner ON entries(created_by, entry_date DESC, id DESC);",
        )
        .await?;
        db.execute_unprepared(
            "CREATE INDEX idx_entries_date ON entries(entry_date DESC, id DESC);",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS entries;").await?;
        Ok(())
    }
}

const ENTRIES_SQL: &str = r"
CREATE TABLE entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_date TEXT NOT NULL,
    payer_name TEXT NOT NULL,
    amount_cents INTEGER NOT NULL CHECK (amount_cents > 0),
    payment_method TEXT NOT NULL,
    category TEXT NOT NULL,
    created_by TEXT NOT NULL,
    email TEXT,
    area_code TEXT,
    phone_number TEXT,
    operator TEXT,
    created_at TEXT NOT NULL
);
";
