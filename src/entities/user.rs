//! User entity - Customers and staff accounts.
//!
//! Authentication internals are out of scope here; users exist so orders have
//! an owner and so staff-only mutations can be role-gated. Roles are stored
//! as strings: `"ADMIN"`, `"MANAGER"`, `"STAFF"`, `"CUSTOMER"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address, unique per account
    #[sea_orm(unique)]
    pub email: String,
    /// Optional phone number
    pub phone: Option<String>,
    /// Role string: `"ADMIN"`, `"MANAGER"`, `"STAFF"`, or `"CUSTOMER"`
    pub role: String,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One user produces many activity log entries
    #[sea_orm(has_many = "super::activity_log::Entity")]
    ActivityLogs,
    /// One user writes many reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLogs.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
