// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` bootstrap: connection setup, PRAGMA configuration, embedded
//! migrations, and the `last_insert_rowid()` workaround. Everything else
//! in this crate goes through the Diesel DSL in `queries` and `mutations`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

// PRAGMA results have no Diesel DSL; raw SQL is the only way in.
#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, applies PRAGMAs, and brings the schema up to date.
///
/// Foreign key enforcement is switched on and then read back; the booking
/// tables lean on referential integrity for project ownership, candidate
/// references, and audit linkage, so a connection that cannot confirm it
/// is rejected. File-backed databases additionally get WAL journaling for
/// read concurrency; the shared in-memory databases used in tests do not
/// support it.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (a file path or a shared
///   in-memory URL)
/// * `wal` - Whether to enable write-ahead logging
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA, or a migration fails, or
/// if foreign key enforcement did not stick.
pub fn open(database_url: &str, wal: bool) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "opening SQLite database");
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    if wal {
        diesel::sql_query("PRAGMA journal_mode = WAL")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    }

    let enforced: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeysPragma>(&mut conn)?
        .foreign_keys;
    if enforced == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    Ok(conn)
}

/// The row id of the most recent insert on this connection.
///
/// Id columns are `INTEGER PRIMARY KEY` and not every insert path can use
/// a `RETURNING` clause, so freshly assigned ids come from
/// `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
