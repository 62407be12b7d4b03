//! The inventory item domain model.
//!
//! [`Item`] is the stored entity; [`ItemDraft`] is the client-supplied
//! payload for create and update. JSON field names are camelCase to match
//! the API contract.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

/// Maximum length of an item name.
pub const NAME_MAX_LEN: usize = 120;

/// Maximum length of an item category.
pub const CATEGORY_MAX_LEN: usize = 64;

/// Maximum length of an item status.
pub const STATUS_MAX_LEN: usize = 32;

/// A stored inventory item.
///
/// `id` is assigned by the storage layer and immutable afterwards.
/// `created_at` is set once at creation; `updated_at` is refreshed on every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Storage-assigned identifier (>= 1).
    pub id: i64,
    /// Unique display name.
    pub name: String,
    /// Free-form description (may be empty).
    pub description: String,
    /// Category used for exact-match filtering.
    pub category: String,
    /// Status used for exact-match filtering.
    pub status: String,
    /// Priority ranking.
    pub priority: i32,
    /// Stock quantity (>= 0).
    pub quantity: i64,
    /// Unit price, serialized as a decimal string.
    pub price: Decimal,
    /// Rate factor.
    pub rate: f64,
    /// Whether the item is active.
    pub active: bool,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional free-form memo.
    pub memo: Option<String>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp (UTC).
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied item fields for create and update.
///
/// Carries every mutable field of [`Item`]; `id` and the timestamps are
/// owned by the service and storage layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    /// Unique display name.
    pub name: String,
    /// Free-form description (may be empty).
    #[serde(default)]
    pub description: String,
    /// Category used for exact-match filtering.
    pub category: String,
    /// Status used for exact-match filtering.
    pub status: String,
    /// Priority ranking.
    #[serde(default)]
    pub priority: i32,
    /// Stock quantity (>= 0).
    #[serde(default)]
    pub quantity: i64,
    /// Unit price as a decimal string.
    #[serde(default)]
    pub price: Decimal,
    /// Rate factor.
    #[serde(default)]
    pub rate: f64,
    /// Whether the item is active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Optional free-form memo.
    #[serde(default)]
    pub memo: Option<String>,
}

fn default_active() -> bool {
    true
}

impl ItemDraft {
    /// Validates the draft, returning every field-level failure at once.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] naming each rejected field when any check
    /// fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "must not be blank");
        } else if self.name.chars().count() > NAME_MAX_LEN {
            errors.add("name", format!("must be at most {NAME_MAX_LEN} characters"));
        }

        if self.category.trim().is_empty() {
            errors.add("category", "must not be blank");
        } else if self.category.chars().count() > CATEGORY_MAX_LEN {
            errors.add(
                "category",
                format!("must be at most {CATEGORY_MAX_LEN} characters"),
            );
        }

        if self.status.trim().is_empty() {
            errors.add("status", "must not be blank");
        } else if self.status.chars().count() > STATUS_MAX_LEN {
            errors.add(
                "status",
                format!("must be at most {STATUS_MAX_LEN} characters"),
            );
        }

        if self.quantity < 0 {
            errors.add("quantity", "must be >= 0");
        }

        if self.price < Decimal::ZERO {
            errors.add("price", "must be >= 0");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Item {
    /// Builds a new item from a draft with both timestamps set to `now`.
    ///
    /// The returned item has `id = 0`; storage assigns the real identifier
    /// on insert.
    #[must_use]
    pub fn from_draft(draft: ItemDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            status: draft.status,
            priority: draft.priority,
            quantity: draft.quantity,
            price: draft.price,
            rate: draft.rate,
            active: draft.active,
            due_date: draft.due_date,
            memo: draft.memo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field from the draft and refreshes
    /// `updated_at`. `id` and `created_at` are untouched.
    pub fn apply_draft(&mut self, draft: ItemDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.status = draft.status;
        self.priority = draft.priority;
        self.quantity = draft.quantity;
        self.price = draft.price;
        self.rate = draft.rate;
        self.active = draft.active;
        self.due_date = draft.due_date;
        self.memo = draft.memo;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ItemDraft {
        ItemDraft {
            name: "M6 hex bolt".to_string(),
            description: "Zinc plated".to_string(),
            category: "fasteners".to_string(),
            status: "in_stock".to_string(),
            priority: 2,
            quantity: 500,
            price: Decimal::new(1250, 2),
            rate: 0.5,
            active: true,
            due_date: None,
            memo: None,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut d = draft();
        d.name = "   ".to_string();
        let errors = d.validate().unwrap_err();
        assert!(errors.fields.contains_key("name"));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut d = draft();
        d.name = "x".repeat(NAME_MAX_LEN + 1);
        let errors = d.validate().unwrap_err();
        assert!(errors.fields.contains_key("name"));
    }

    #[test]
    fn test_negative_quantity_and_price_rejected() {
        let mut d = draft();
        d.quantity = -1;
        d.price = Decimal::new(-100, 2);
        let errors = d.validate().unwrap_err();
        assert!(errors.fields.contains_key("quantity"));
        assert!(errors.fields.contains_key("price"));
    }

    #[test]
    fn test_multiple_failures_reported_together() {
        let d = ItemDraft {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            status: String::new(),
            priority: 0,
            quantity: -5,
            price: Decimal::ZERO,
            rate: 0.0,
            active: true,
            due_date: None,
            memo: None,
        };
        let errors = d.validate().unwrap_err();
        assert_eq!(errors.len(), 4); // name, category, status, quantity
    }

    #[test]
    fn test_from_draft_sets_both_timestamps() {
        let now = Utc::now();
        let item = Item::from_draft(draft(), now);
        assert_eq!(item.id, 0);
        assert_eq!(item.created_at, now);
        assert_eq!(item.updated_at, now);
    }

    #[test]
    fn test_apply_draft_preserves_id_and_created_at() {
        let created = Utc::now();
        let mut item = Item::from_draft(draft(), created);
        item.id = 7;

        let later = created + chrono::Duration::seconds(5);
        let mut updated = draft();
        updated.name = "M8 hex bolt".to_string();
        item.apply_draft(updated, later);

        assert_eq!(item.id, 7);
        assert_eq!(item.created_at, created);
        assert_eq!(item.updated_at, later);
        assert_eq!(item.name, "M8 hex bolt");
    }

    #[test]
    fn test_item_json_is_camel_case() {
        let now = Utc::now();
        let mut item = Item::from_draft(draft(), now);
        item.due_date = NaiveDate::from_ymd_opt(2026, 9, 1);

        let json = serde_json::to_value(&item).expect("serializes");
        assert!(json.get("dueDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        // Price travels as a decimal string.
        assert_eq!(json["price"], "12.50");
    }

    #[test]
    fn test_draft_deserializes_with_defaults() {
        let json = r#"{"name": "Washer", "category": "fasteners", "status": "in_stock"}"#;
        let d: ItemDraft = serde_json::from_str(json).expect("deserializes");
        assert!(d.active);
        assert_eq!(d.quantity, 0);
        assert_eq!(d.price, Decimal::ZERO);
        assert!(d.due_date.is_none());
    }
}
