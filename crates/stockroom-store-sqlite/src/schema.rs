//! SQL schema for the Stockroom SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

-- Bearer sessions; the raw token never touches disk, only its SHA-256
-- fingerprint.
CREATE TABLE IF NOT EXISTS sessions (
    token_hash TEXT PRIMARY KEY,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    expires_at TEXT NOT NULL
);

-- sku is UNIQUE globally, not per owner.
CREATE TABLE IF NOT EXISTS items (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name       TEXT NOT NULL,
    sku        TEXT NOT NULL UNIQUE,
    category   TEXT NOT NULL,
    stock      INTEGER NOT NULL DEFAULT 0,
    price      REAL NOT NULL DEFAULT 0.0,
    created_at TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    updated_at TEXT NOT NULL    -- refreshed on every update
);

CREATE INDEX IF NOT EXISTS items_owner_idx    ON items(owner_id);
CREATE INDEX IF NOT EXISTS items_category_idx ON items(category);
CREATE INDEX IF NOT EXISTS items_created_idx  ON items(created_at);

PRAGMA user_version = 1;
";
