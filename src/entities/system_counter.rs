//! System counter entity - Named monotonic counters.
//!
//! Backs order-number generation: the counter row is incremented atomically
//! inside the order-placement transaction, which guarantees unique numbers
//! under concurrent submissions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// System counter database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_counters")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Counter name (e.g., `"order_sequence"`)
    #[sea_orm(unique)]
    pub name: String,
    /// Current counter value
    pub value: i64,
}

/// `SystemCounter` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
