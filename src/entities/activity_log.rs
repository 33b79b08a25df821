//! Activity log entity - Append-only record of state-changing actions.
//!
//! Entries are written as a side effect of mutating operations (order
//! creation, status changes, menu administration) inside the same database
//! transaction, and are immutable once written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the acting user
    pub user_id: i64,
    /// Optional reference to the order this entry is about
    pub order_id: Option<i64>,
    /// Action kind (e.g., `"ORDER_CREATED"`, `"ORDER_STATUS_UPDATED"`)
    pub action: String,
    /// Human-readable description of what happened
    pub description: String,
    /// Optional JSON blob with structured details
    pub metadata: Option<String>,
    /// When the entry was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `ActivityLog` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry was produced by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// An entry may reference one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
