use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use networth_core::entries::{AssetEntry, AssetEntryUpdate, EntryRepositoryTrait, NewAssetEntry};
use networth_core::Result;

use super::model::{AssetEntryChangesetDB, AssetEntryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::asset_entries;
use crate::schema::asset_entries::dsl::*;

pub struct EntryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl EntryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        EntryRepository { pool, writer }
    }
}

#[async_trait]
impl EntryRepositoryTrait for EntryRepository {
    fn list_entries(&self) -> Result<Vec<AssetEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = asset_entries
            .select(AssetEntryDB::as_select())
            .order((created_at.desc(), id.asc()))
            .load::<AssetEntryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(AssetEntry::from).collect())
    }

    fn get_entry(&self, entry_id: &str) -> Result<AssetEntry> {
        let mut conn = get_connection(&self.pool)?;
        let row = asset_entries
            .find(entry_id)
            .select(AssetEntryDB::as_select())
            .first::<AssetEntryDB>(&mut conn)
            .into_core()?;
        Ok(AssetEntry::from(row))
    }

    async fn insert_entry(&self, new_entry: NewAssetEntry) -> Result<AssetEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AssetEntry> {
                let row = AssetEntryDB::from_new(
                    Uuid::new_v4().to_string(),
                    Utc::now().naive_utc(),
                    new_entry,
                );
                let inserted = diesel::insert_into(asset_entries::table)
                    .values(&row)
                    .returning(AssetEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(AssetEntry::from(inserted))
            })
            .await
    }

    async fn update_entry(
        &self,
        entry_id: String,
        changes: AssetEntryUpdate,
    ) -> Result<AssetEntry> {
        let changeset: AssetEntryChangesetDB = changes.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AssetEntry> {
                let updated = diesel::update(asset_entries.find(entry_id))
                    .set(&changeset)
                    .returning(AssetEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(AssetEntry::from(updated))
            })
            .await
    }

    async fn delete_entry(&self, entry_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(asset_entries.find(entry_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
