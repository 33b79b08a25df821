//! Menu catalog business logic.
//!
//! Provides the public catalog queries (list with filters, fetch by id) that
//! the cart and order validation read from, plus the role-gated admin
//! operations for managing menu items. Menu items are never hard-deleted:
//! deactivation keeps them for order history but removes them from the
//! orderable menu.

use crate::{
    core::audit,
    entities::{MenuItem, menu_item, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Roles allowed to create, update, and deactivate menu items.
const MENU_MANAGER_ROLES: [&str; 2] = ["ADMIN", "MANAGER"];

/// Filter for catalog listings. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// Only items in this category
    pub category: Option<String>,
    /// Only items with this active flag
    pub is_active: Option<bool>,
    /// Only items with this vegetarian flag
    pub is_vegetarian: Option<bool>,
}

/// Fields for a new menu item.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    /// Item name, must be non-empty
    pub name: String,
    /// Menu description
    pub description: String,
    /// Price in euros, must be positive and finite
    pub price: f64,
    /// Menu category
    pub category: String,
    /// Whether the item is vegetarian
    pub is_vegetarian: bool,
    /// Spice level 0-3
    pub spice_level: i32,
}

/// Lists menu items matching the filter, most-ordered first, then by name.
///
/// Popularity ordering keeps the storefront's "most popular" sections stable
/// without a separate query.
pub async fn list_menu_items(
    db: &DatabaseConnection,
    filter: &MenuFilter,
) -> Result<Vec<menu_item::Model>> {
    let mut query = MenuItem::find();

    if let Some(category) = &filter.category {
        query = query.filter(menu_item::Column::Category.eq(category));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(menu_item::Column::IsActive.eq(is_active));
    }
    if let Some(is_vegetarian) = filter.is_vegetarian {
        query = query.filter(menu_item::Column::IsVegetarian.eq(is_vegetarian));
    }

    query
        .order_by_desc(menu_item::Column::OrderCount)
        .order_by_asc(menu_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a single menu item by its unique ID.
pub async fn get_menu_item(
    db: &DatabaseConnection,
    menu_item_id: i64,
) -> Result<Option<menu_item::Model>> {
    MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new menu item, performing input validation and role gating.
///
/// # Errors
/// Returns an error if:
/// - The actor is not an admin or manager
/// - The name is empty or whitespace-only
/// - The price is not positive and finite
/// - The spice level is outside 0-3
pub async fn create_menu_item(
    db: &DatabaseConnection,
    actor: &user::Model,
    new_item: NewMenuItem,
) -> Result<menu_item::Model> {
    require_menu_manager(actor)?;
    validate_item_fields(&new_item.name, new_item.price, new_item.spice_level)?;

    let now = chrono::Utc::now();
    let item = menu_item::ActiveModel {
        name: Set(new_item.name.trim().to_string()),
        description: Set(new_item.description),
        price: Set(new_item.price),
        category: Set(new_item.category),
        is_vegetarian: Set(new_item.is_vegetarian),
        spice_level: Set(new_item.spice_level),
        is_active: Set(true),
        order_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = item.insert(db).await?;

    audit::append(
        db,
        actor.id,
        None,
        audit::MENU_ITEM_CREATED,
        format!("Menu item {} created", created.name),
        None,
    )
    .await?;

    Ok(created)
}

/// Updates an existing menu item's orderable fields.
///
/// Historical order lines keep the price they were placed at; only future
/// orders see the change.
pub async fn update_menu_item(
    db: &DatabaseConnection,
    actor: &user::Model,
    menu_item_id: i64,
    changes: NewMenuItem,
) -> Result<menu_item::Model> {
    require_menu_manager(actor)?;
    validate_item_fields(&changes.name, changes.price, changes.spice_level)?;

    let mut item: menu_item::ActiveModel = MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "menu item",
            id: menu_item_id.to_string(),
        })?
        .into();

    item.name = Set(changes.name.trim().to_string());
    item.description = Set(changes.description);
    item.price = Set(changes.price);
    item.category = Set(changes.category);
    item.is_vegetarian = Set(changes.is_vegetarian);
    item.spice_level = Set(changes.spice_level);
    item.updated_at = Set(chrono::Utc::now());

    let updated = item.update(db).await?;

    audit::append(
        db,
        actor.id,
        None,
        audit::MENU_ITEM_UPDATED,
        format!("Menu item {} updated", updated.name),
        None,
    )
    .await?;

    Ok(updated)
}

/// Takes a menu item off the menu without deleting it.
pub async fn deactivate_menu_item(
    db: &DatabaseConnection,
    actor: &user::Model,
    menu_item_id: i64,
) -> Result<menu_item::Model> {
    require_menu_manager(actor)?;

    let mut item: menu_item::ActiveModel = MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "menu item",
            id: menu_item_id.to_string(),
        })?
        .into();

    item.is_active = Set(false);
    item.updated_at = Set(chrono::Utc::now());
    let updated = item.update(db).await?;

    audit::append(
        db,
        actor.id,
        None,
        audit::MENU_ITEM_DEACTIVATED,
        format!("Menu item {} deactivated", updated.name),
        None,
    )
    .await?;

    Ok(updated)
}

/// Atomically increments a menu item's order count.
///
/// Uses a single column expression (`order_count = order_count + qty`) so
/// concurrent order submissions never lose an update.
pub async fn increment_order_count_atomic<C>(
    conn: &C,
    menu_item_id: i64,
    quantity: i64,
) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    MenuItem::update_many()
        .col_expr(
            menu_item::Column::OrderCount,
            Expr::col(menu_item::Column::OrderCount).add(quantity),
        )
        .filter(menu_item::Column::Id.eq(menu_item_id))
        .exec(conn)
        .await?;

    Ok(())
}

fn require_menu_manager(actor: &user::Model) -> Result<()> {
    if MENU_MANAGER_ROLES.contains(&actor.role.as_str()) {
        Ok(())
    } else {
        Err(Error::Forbidden {
            action: "manage menu items".to_string(),
        })
    }
}

fn validate_item_fields(name: &str, price: f64, spice_level: i32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Menu item name cannot be empty"));
    }
    if price <= 0.0 || !price.is_finite() {
        return Err(Error::validation(format!("Invalid price: {price}")));
    }
    if !(0..=3).contains(&spice_level) {
        return Err(Error::validation(format!(
            "Spice level must be 0-3, got {spice_level}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn chai() -> NewMenuItem {
        NewMenuItem {
            name: "Masala Chai".to_string(),
            description: "Spiced tea with milk".to_string(),
            price: 3.50,
            category: "drinks".to_string(),
            is_vegetarian: true,
            spice_level: 0,
        }
    }

    #[tokio::test]
    async fn test_create_menu_item_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db).await?;

        let result = create_menu_item(
            &db,
            &admin,
            NewMenuItem {
                name: "  ".to_string(),
                ..chai()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_menu_item(
            &db,
            &admin,
            NewMenuItem {
                price: 0.0,
                ..chai()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_menu_item(
            &db,
            &admin,
            NewMenuItem {
                price: f64::NAN,
                ..chai()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_menu_item(
            &db,
            &admin,
            NewMenuItem {
                spice_level: 4,
                ..chai()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_role_gating() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db).await?;

        let result = create_menu_item(&db, &customer, chai()).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_writes_audit_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db).await?;

        let item = create_menu_item(&db, &admin, chai()).await?;
        assert_eq!(item.name, "Masala Chai");
        assert!(item.is_active);
        assert_eq!(item.order_count, 0);

        let entries = audit::recent(&db, 10).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, audit::MENU_ITEM_CREATED);
        assert_eq!(entries[0].user_id, admin.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_menu_items_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db).await?;

        create_menu_item(&db, &admin, chai()).await?;
        let momos = create_menu_item(
            &db,
            &admin,
            NewMenuItem {
                name: "Traditional Chicken Momos".to_string(),
                description: "Steamed chicken dumplings".to_string(),
                price: 12.90,
                category: "momos".to_string(),
                is_vegetarian: false,
                spice_level: 2,
            },
        )
        .await?;
        deactivate_menu_item(&db, &admin, momos.id).await?;

        let all = list_menu_items(&db, &MenuFilter::default()).await?;
        assert_eq!(all.len(), 2);

        let active_only = list_menu_items(
            &db,
            &MenuFilter {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(active_only.len(), 1);
        assert_eq!(active_only[0].name, "Masala Chai");

        let vegetarian = list_menu_items(
            &db,
            &MenuFilter {
                is_vegetarian: Some(false),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(vegetarian.len(), 1);
        assert_eq!(vegetarian[0].name, "Traditional Chicken Momos");

        let drinks = list_menu_items(
            &db,
            &MenuFilter {
                category: Some("drinks".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(drinks.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_by_popularity() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db).await?;

        let chai_item = create_menu_item(&db, &admin, chai()).await?;
        create_menu_item(
            &db,
            &admin,
            NewMenuItem {
                name: "Vegetable Momos".to_string(),
                description: "Steamed vegetable dumplings".to_string(),
                price: 10.90,
                category: "momos".to_string(),
                is_vegetarian: true,
                spice_level: 1,
            },
        )
        .await?;

        increment_order_count_atomic(&db, chai_item.id, 5).await?;

        let listed = list_menu_items(&db, &MenuFilter::default()).await?;
        assert_eq!(listed[0].name, "Masala Chai");
        assert_eq!(listed[0].order_count, 5);
        assert_eq!(listed[1].name, "Vegetable Momos");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_menu_item_price_change() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db).await?;

        let item = create_menu_item(&db, &admin, chai()).await?;
        let updated = update_menu_item(
            &db,
            &admin,
            item.id,
            NewMenuItem {
                price: 4.00,
                ..chai()
            },
        )
        .await?;

        assert_eq!(updated.price, 4.00);
        assert!(updated.updated_at >= item.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db).await?;

        let result = update_menu_item(&db, &admin, 999, chai()).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
