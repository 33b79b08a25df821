//! Order entity - A persisted customer order.
//!
//! The `total` is server-authoritative: it is recomputed from current menu
//! prices at placement time and includes the delivery fee when the order type
//! is `DELIVERY`. The `order_number` is unique and backed by a database
//! counter, so concurrent submissions can never collide.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable unique order number (e.g., `"EK000042"`)
    #[sea_orm(unique)]
    pub order_number: String,
    /// ID of the customer who placed the order
    pub customer_id: i64,
    /// Customer name as entered at checkout
    pub customer_name: String,
    /// Customer phone number used for verification
    pub customer_phone: String,
    /// Optional customer email
    pub customer_email: Option<String>,
    /// Order type: `"PICKUP"` or `"DELIVERY"`
    pub order_type: String,
    /// Lifecycle status, one of the six states plus `"CANCELLED"`
    pub status: String,
    /// Server-computed total including the delivery fee
    pub total: f64,
    /// Delivery surcharge applied (0 for pickup)
    pub delivery_fee: f64,
    /// Delivery address, required when `order_type` is `"DELIVERY"`
    pub address: Option<String>,
    /// Free-form order notes
    pub notes: Option<String>,
    /// Advisory estimated-time string set by staff (not a scheduler)
    pub estimated_time: Option<String>,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// Each order belongs to one customer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id"
    )]
    Customer,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
