//! Review entity - Customer feedback awaiting moderation.
//!
//! Reviews arrive with status `"PENDING"` and become visible to the public
//! surface only once a manager approves them. `platform` records where the
//! review came from (the site itself or an external listing).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the customer who wrote the review
    pub customer_id: i64,
    /// Star rating from 1 to 5
    pub rating: i32,
    /// The review text
    pub comment: String,
    /// Where the review was left (e.g., `"Website"`, `"Google"`)
    pub platform: String,
    /// Moderation status: `"PENDING"`, `"APPROVED"`, or `"REJECTED"`
    pub status: String,
    /// When the review was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review was written by one customer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id"
    )]
    Customer,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
