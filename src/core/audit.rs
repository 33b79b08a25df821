//! Activity log business logic.
//!
//! Mutating operations append one entry each describing what happened, who
//! did it, and (where relevant) which order it concerns. `append` is generic
//! over the connection so it can run inside an open transaction and commit
//! atomically with the operation it records.

use crate::{
    entities::{ActivityLog, activity_log},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// Action kind: a new order was placed
pub const ORDER_CREATED: &str = "ORDER_CREATED";
/// Action kind: an order moved to a new lifecycle status
pub const ORDER_STATUS_UPDATED: &str = "ORDER_STATUS_UPDATED";
/// Action kind: a menu item was created
pub const MENU_ITEM_CREATED: &str = "MENU_ITEM_CREATED";
/// Action kind: a menu item was modified
pub const MENU_ITEM_UPDATED: &str = "MENU_ITEM_UPDATED";
/// Action kind: a menu item was taken off the menu
pub const MENU_ITEM_DEACTIVATED: &str = "MENU_ITEM_DEACTIVATED";
/// Action kind: a review was approved or rejected by a moderator
pub const REVIEW_STATUS_UPDATED: &str = "REVIEW_STATUS_UPDATED";

/// Appends one activity log entry.
///
/// # Arguments
/// * `conn` - Database connection or open transaction
/// * `user_id` - The acting user
/// * `order_id` - Order the entry references, if any
/// * `action` - One of the action kind constants in this module
/// * `description` - Human-readable summary
/// * `metadata` - Optional JSON string with structured details
pub async fn append<C>(
    conn: &C,
    user_id: i64,
    order_id: Option<i64>,
    action: &str,
    description: String,
    metadata: Option<String>,
) -> Result<activity_log::Model>
where
    C: ConnectionTrait,
{
    let entry = activity_log::ActiveModel {
        user_id: Set(user_id),
        order_id: Set(order_id),
        action: Set(action.to_string()),
        description: Set(description),
        metadata: Set(metadata),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    entry.insert(conn).await.map_err(Into::into)
}

/// Retrieves the most recent activity entries, newest first.
pub async fn recent(db: &DatabaseConnection, limit: u64) -> Result<Vec<activity_log::Model>> {
    ActivityLog::find()
        .order_by_desc(activity_log::Column::CreatedAt)
        .order_by_desc(activity_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all entries referencing a specific order, oldest first.
///
/// Used to reconstruct an order's lifecycle for support queries.
pub async fn entries_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<activity_log::Model>> {
    ActivityLog::find()
        .filter(activity_log::Column::OrderId.eq(order_id))
        .order_by_asc(activity_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_append_and_read_back() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_customer(&db).await?;

        let entry = append(
            &db,
            user.id,
            None,
            MENU_ITEM_CREATED,
            "Menu item Masala Chai created".to_string(),
            None,
        )
        .await?;

        assert_eq!(entry.user_id, user.id);
        assert_eq!(entry.action, MENU_ITEM_CREATED);
        assert!(entry.order_id.is_none());

        let entries = recent(&db, 10).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);

        Ok(())
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_customer(&db).await?;

        for n in 0..3 {
            append(
                &db,
                user.id,
                None,
                MENU_ITEM_UPDATED,
                format!("update {n}"),
                None,
            )
            .await?;
        }

        let entries = recent(&db, 2).await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "update 2");
        assert_eq!(entries[1].description, "update 1");

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_for_order_filtering() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_customer(&db).await?;
        let first = insert_bare_order(&db, user.id, "EK000007").await?;
        let second = insert_bare_order(&db, user.id, "EK000008").await?;

        append(
            &db,
            user.id,
            Some(first.id),
            ORDER_CREATED,
            "Order EK000007 created".to_string(),
            Some(r#"{"total":12.9}"#.to_string()),
        )
        .await?;
        append(
            &db,
            user.id,
            Some(second.id),
            ORDER_CREATED,
            "Order EK000008 created".to_string(),
            None,
        )
        .await?;

        let entries = entries_for_order(&db, first.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].order_id, Some(first.id));

        Ok(())
    }

    async fn insert_bare_order(
        db: &DatabaseConnection,
        customer_id: i64,
        order_number: &str,
    ) -> Result<crate::entities::order::Model> {
        let model = crate::entities::order::ActiveModel {
            order_number: Set(order_number.to_string()),
            customer_id: Set(customer_id),
            customer_name: Set("Test Customer".to_string()),
            customer_phone: Set("+49 151 1234567".to_string()),
            customer_email: Set(None),
            order_type: Set("PICKUP".to_string()),
            status: Set("PENDING".to_string()),
            total: Set(3.50),
            delivery_fee: Set(0.0),
            address: Set(None),
            notes: Set(None),
            estimated_time: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        model.insert(db).await.map_err(Into::into)
    }
}
