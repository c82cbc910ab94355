/**
 * Item Service
 *
 * The standalone item catalog. Catalog items are global: any authenticated
 * user can read and edit them. A list references a catalog item by carrying
 * an entry with the same id; deleting the item pulls that entry from every
 * list, while deleting a list leaves the catalog untouched.
 */

use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::sharing::Membership;
use crate::backend::store::Store;
use crate::shared::model::{required_name, CreateItemRequest, Item, ItemUpdate};

/// Operations on the item catalog
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn Store>,
}

impl ItemService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateItemRequest) -> Result<Item, BackendError> {
        let name = required_name("name", &request.name)?;
        let item = self.store.insert_item(Item::new(name, request.checked)).await?;
        tracing::debug!("Catalog item {} created", item.id);
        Ok(item)
    }

    pub async fn get(&self, id: Uuid) -> Result<Item, BackendError> {
        self.store
            .find_item(id)
            .await?
            .ok_or_else(|| BackendError::not_found("Item not found"))
    }

    pub async fn all(&self) -> Result<Vec<Item>, BackendError> {
        Ok(self.store.all_items().await?)
    }

    /// Partial update of `name` and `checked`
    ///
    /// Entries already copied into lists keep their own name and state.
    pub async fn modify(&self, id: Uuid, update: ItemUpdate) -> Result<Item, BackendError> {
        let update = ItemUpdate {
            name: update.name.map(|name| required_name("name", &name)).transpose()?,
            checked: update.checked,
        };
        self.store
            .update_item(id, update)
            .await?
            .ok_or_else(|| BackendError::not_found("Item not found"))
    }

    /// Delete a catalog item and pull it from every list
    pub async fn delete(&self, id: Uuid) -> Result<Item, BackendError> {
        let item = self
            .store
            .delete_item(id)
            .await?
            .ok_or_else(|| BackendError::not_found("Item not found"))?;
        let lists = self.store.pull_item_from_lists(id).await?;
        tracing::info!("Catalog item {} deleted and pulled from {} lists", id, lists);
        Ok(item)
    }

    /// The catalog items a visible list references, in list order
    ///
    /// Entries that were never catalog items are skipped.
    pub async fn items_of_list(&self, actor: Uuid, list_id: Uuid) -> Result<Vec<Item>, BackendError> {
        let list = self
            .store
            .find_list(list_id)
            .await?
            .filter(|list| Membership::from(list).includes(actor))
            .ok_or_else(|| BackendError::not_found("List not found"))?;

        let ids: Vec<Uuid> = list.items.iter().map(|entry| entry.id).collect();
        let mut items = self.store.find_items(&ids).await?;
        items.sort_by_key(|item| ids.iter().position(|id| *id == item.id));
        Ok(items)
    }
}
