//! `SeaORM` entity definitions.

pub mod entries;
