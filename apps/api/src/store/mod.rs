//! Typed query helpers, one module per table. No business rules live here:
//! ownership and validation are enforced by the handlers before calling in.

pub mod portfolios;
pub mod projects;
pub mod templates;
pub mod users;
pub mod versions;

/// True when `err` is a Postgres unique-constraint violation (e.g. duplicate slug).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True when `err` is a Postgres foreign-key violation (e.g. a template deleted mid-request).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
