use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::entries::entries_model::{AssetEntry, AssetEntryUpdate, NewAssetEntry};
use crate::entries::entries_traits::{EntryRepositoryTrait, EntryServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

pub struct EntryService {
    entry_repository: Arc<dyn EntryRepositoryTrait>,
}

impl EntryService {
    pub fn new(entry_repository: Arc<dyn EntryRepositoryTrait>) -> Self {
        EntryService { entry_repository }
    }
}

#[async_trait]
impl EntryServiceTrait for EntryService {
    fn get_entries(&self) -> Result<Vec<AssetEntry>> {
        self.entry_repository.list_entries()
    }

    async fn create_entry(&self, new_entry: NewAssetEntry) -> Result<AssetEntry> {
        new_entry.validate()?;
        let created = self.entry_repository.insert_entry(new_entry).await?;
        info!(
            "Created entry {} ({} / {})",
            created.id, created.platform, created.asset_type
        );
        Ok(created)
    }

    async fn update_entry(
        &self,
        entry_id: String,
        changes: AssetEntryUpdate,
    ) -> Result<AssetEntry> {
        let changes = changes.normalize()?;
        if changes.is_empty() {
            debug!("Empty update for entry {}, returning current state", entry_id);
            return self.entry_repository.get_entry(&entry_id);
        }
        self.entry_repository.update_entry(entry_id, changes).await
    }

    async fn delete_entry(&self, entry_id: String) -> Result<()> {
        let deleted = self.entry_repository.delete_entry(entry_id.clone()).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Entry {} not found",
                entry_id
            ))));
        }
        info!("Deleted entry {}", entry_id);
        Ok(())
    }
}
