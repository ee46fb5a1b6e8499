//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `EntryStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use journal_core::domain::{Entry, EntryPatch, NewEntry};
use journal_core::ports::{EntryStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `EntryStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct EntryRecord {
    id: Uuid,
    work: String,
    struggle: String,
    intention: String,
    created_at: DateTime<Utc>,
}

impl EntryRecord {
    fn to_domain(self) -> Entry {
        Entry {
            id: self.id,
            work: self.work,
            struggle: self.struggle,
            intention: self.intention,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// `EntryStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl EntryStore for DbAdapter {
    async fn create(&self, new: NewEntry) -> PortResult<Entry> {
        let record = sqlx::query_as::<_, EntryRecord>(
            "INSERT INTO entries (id, work, struggle, intention) VALUES ($1, $2, $3, $4) \
             RETURNING id, work, struggle, intention, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new.work)
        .bind(&new.struggle)
        .bind(&new.intention)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(record.to_domain())
    }

    async fn get(&self, id: Uuid) -> PortResult<Entry> {
        let record = sqlx::query_as::<_, EntryRecord>(
            "SELECT id, work, struggle, intention, created_at FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("Entry {} not found", id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn update(&self, id: Uuid, patch: EntryPatch) -> PortResult<Entry> {
        // COALESCE keeps any field the patch leaves out; created_at is never
        // touched.
        let record = sqlx::query_as::<_, EntryRecord>(
            "UPDATE entries SET \
                 work = COALESCE($2, work), \
                 struggle = COALESCE($3, struggle), \
                 intention = COALESCE($4, intention) \
             WHERE id = $1 \
             RETURNING id, work, struggle, intention, created_at",
        )
        .bind(id)
        .bind(patch.work)
        .bind(patch.struggle)
        .bind(patch.intention)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("Entry {} not found", id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn delete(&self, id: Uuid) -> PortResult<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> PortResult<()> {
        sqlx::query("DELETE FROM entries")
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn list_all(&self) -> PortResult<Vec<Entry>> {
        let records = sqlx::query_as::<_, EntryRecord>(
            "SELECT id, work, struggle, intention, created_at FROM entries \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(records.into_iter().map(EntryRecord::to_domain).collect())
    }
}
