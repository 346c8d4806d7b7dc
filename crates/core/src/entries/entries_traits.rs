use crate::entries::entries_model::{AssetEntry, AssetEntryUpdate, NewAssetEntry};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for entry repository operations
#[async_trait]
pub trait EntryRepositoryTrait: Send + Sync {
    fn list_entries(&self) -> Result<Vec<AssetEntry>>;
    fn get_entry(&self, entry_id: &str) -> Result<AssetEntry>;
    async fn insert_entry(&self, new_entry: NewAssetEntry) -> Result<AssetEntry>;
    async fn update_entry(&self, entry_id: String, changes: AssetEntryUpdate)
        -> Result<AssetEntry>;
    async fn delete_entry(&self, entry_id: String) -> Result<usize>;
}

/// Trait for entry service operations
#[async_trait]
pub trait EntryServiceTrait: Send + Sync {
    fn get_entries(&self) -> Result<Vec<AssetEntry>>;
    async fn create_entry(&self, new_entry: NewAssetEntry) -> Result<AssetEntry>;
    async fn update_entry(&self, entry_id: String, changes: AssetEntryUpdate)
        -> Result<AssetEntry>;
    async fn delete_entry(&self, entry_id: String) -> Result<()>;
}
