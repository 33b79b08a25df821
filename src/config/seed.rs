//! Menu seeding from settings.
//!
//! Inserts the menu items listed in config.toml on first run. Seeding is
//! idempotent: items are matched by name and never duplicated or overwritten,
//! so menu edits made through the catalog survive restarts.

use crate::{
    config::settings::Settings,
    entities::{MenuItem, menu_item},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Seeds menu items from the settings, skipping names that already exist.
///
/// Returns how many items were inserted.
pub async fn seed_menu_items(db: &DatabaseConnection, settings: &Settings) -> Result<usize> {
    let mut inserted = 0;

    for seed in &settings.menu {
        let existing = MenuItem::find()
            .filter(menu_item::Column::Name.eq(&seed.name))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        let now = chrono::Utc::now();
        let item = menu_item::ActiveModel {
            name: Set(seed.name.clone()),
            description: Set(seed.description.clone()),
            price: Set(seed.price),
            category: Set(seed.category.clone()),
            is_vegetarian: Set(seed.is_vegetarian),
            spice_level: Set(seed.spice_level),
            is_active: Set(true),
            order_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        item.insert(db).await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!("Seeded {inserted} menu items");
    }

    Ok(inserted)
}
