//! Menu item entity - Represents a dish or drink on the restaurant menu.
//!
//! Each menu item carries a price, category, dietary flags, an active flag,
//! and a monotonic `order_count` incremented every time the item is ordered.
//! Inactive items remain in the table for order history but cannot be ordered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the item (e.g., "Traditional Chicken Momos")
    pub name: String,
    /// Short menu description shown to customers
    pub description: String,
    /// Current price in euros; order items snapshot this at order time
    pub price: f64,
    /// Menu category for filtering (e.g., "momos", "curries", "drinks")
    pub category: String,
    /// Whether the item contains no meat or fish
    pub is_vegetarian: bool,
    /// Spice level from 0 (mild) to 3 (very hot)
    pub spice_level: i32,
    /// Whether the item can currently be ordered; false hides it from the menu
    pub is_active: bool,
    /// How many units of this item have ever been ordered
    pub order_count: i64,
    /// When the item was created
    pub created_at: DateTimeUtc,
    /// When the item was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `MenuItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One menu item appears in many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
