//! Item operations: get, create, update, delete, search, list.

use chrono::Utc;
use tracing::info;

use stockroom_core::{Item, ItemDraft, PageRequest, PageResponse, StockroomError, StockroomResult};
use stockroom_store::{ItemFilter, ItemStore, StoreError};

/// Service layer over [`ItemStore`].
///
/// Cheap to clone; clones share the underlying store.
#[derive(Debug, Clone)]
pub struct ItemService {
    store: ItemStore,
}

impl ItemService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }

    /// Returns the backing store (used for readiness probes).
    #[must_use]
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Fetches an item by id.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` if no item has this id.
    pub fn get(&self, id: i64) -> StockroomResult<Item> {
        self.store
            .find_by_id(id)
            .map_err(into_service_error)?
            .ok_or_else(|| StockroomError::not_found_resource("Item", id.to_string()))
    }

    /// Creates a new item from a draft.
    ///
    /// Sets `created_at = updated_at = now`; the id comes from storage.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` if the draft is invalid; `CONFLICT` if an item
    /// with the same name already exists.
    pub fn create(&self, draft: ItemDraft) -> StockroomResult<Item> {
        draft
            .validate()
            .map_err(|e| StockroomError::validation_with_fields("validation failed", e))?;

        let duplicates = self
            .store
            .count_by_name(&draft.name)
            .map_err(into_service_error)?;
        if duplicates > 0 {
            return Err(StockroomError::conflict(format!(
                "item with name '{}' already exists",
                draft.name
            )));
        }

        let mut item = Item::from_draft(draft, Utc::now());
        item.id = self.store.insert(&item).map_err(into_service_error)?;

        info!(item_id = item.id, name = %item.name, "created item");
        Ok(item)
    }

    /// Replaces every mutable field of an existing item.
    ///
    /// `id` and `created_at` are preserved; `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` if the draft is invalid; `NOT_FOUND` if the id
    /// does not exist; `CONFLICT` when renaming onto an existing name.
    pub fn update(&self, id: i64, draft: ItemDraft) -> StockroomResult<Item> {
        draft
            .validate()
            .map_err(|e| StockroomError::validation_with_fields("validation failed", e))?;

        let mut existing = self.get(id)?;
        existing.apply_draft(draft, Utc::now());

        let updated = self.store.update(&existing).map_err(into_service_error)?;
        if !updated {
            // Row vanished between the existence check and the write.
            return Err(StockroomError::not_found_resource("Item", id.to_string()));
        }

        info!(item_id = id, "updated item");
        Ok(existing)
    }

    /// Deletes an item by id.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` if no item has this id.
    pub fn delete(&self, id: i64) -> StockroomResult<()> {
        let deleted = self.store.delete(id).map_err(into_service_error)?;
        if !deleted {
            return Err(StockroomError::not_found_resource("Item", id.to_string()));
        }

        info!(item_id = id, "deleted item");
        Ok(())
    }

    /// Runs a filtered search. Blank filter strings are treated as absent,
    /// matching the lenient query-parameter contract.
    pub fn search(
        &self,
        name: Option<String>,
        category: Option<String>,
        status: Option<String>,
        active: Option<bool>,
    ) -> StockroomResult<Vec<Item>> {
        let filter = ItemFilter {
            name: non_blank(name),
            category: non_blank(category),
            status: non_blank(status),
            active,
        };
        self.store.search(&filter).map_err(into_service_error)
    }

    /// Returns one page of items plus total counts.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` if the page request is out of bounds.
    pub fn list(&self, request: PageRequest) -> StockroomResult<PageResponse<Item>> {
        request
            .validate()
            .map_err(|e| StockroomError::validation_with_fields("validation failed", e))?;

        let total = self.store.count_all().map_err(into_service_error)?;
        let content = self
            .store
            .page(request.limit(), request.offset())
            .map_err(into_service_error)?;

        Ok(PageResponse::of(content, total, request.page, request.size))
    }
}

/// Keeps filter strings with content, drops blank ones.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Maps storage failures onto service errors: unique violations become
/// conflicts, everything else is internal.
fn into_service_error(err: StoreError) -> StockroomError {
    match err {
        StoreError::UniqueViolation { .. } => {
            StockroomError::conflict("item name already exists")
        }
        StoreError::Sqlite(source) => {
            StockroomError::internal_with_source("database operation failed", source)
        }
    }
}
