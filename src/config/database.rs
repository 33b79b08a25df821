//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{
    ActivityLog, MenuItem, Order, OrderItem, Review, SystemCounter, User, VerificationCode,
    system_counter,
};
use crate::errors::Result;
use sea_orm::{Database, DatabaseConnection, Schema, Set, prelude::*};

/// Name of the counter backing order-number generation.
pub const ORDER_SEQUENCE_COUNTER: &str = "order_sequence";

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/everest_kitchen.sqlite".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Creates tables for users, menu items, orders, order items, verification
/// codes, the activity log, and system counters.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let menu_item_table = schema.create_table_from_entity(MenuItem);
    let order_table = schema.create_table_from_entity(Order);
    let order_item_table = schema.create_table_from_entity(OrderItem);
    let verification_code_table = schema.create_table_from_entity(VerificationCode);
    let activity_log_table = schema.create_table_from_entity(ActivityLog);
    let review_table = schema.create_table_from_entity(Review);
    let system_counter_table = schema.create_table_from_entity(SystemCounter);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&menu_item_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;
    db.execute(builder.build(&verification_code_table)).await?;
    db.execute(builder.build(&activity_log_table)).await?;
    db.execute(builder.build(&review_table)).await?;
    db.execute(builder.build(&system_counter_table)).await?;

    // The order-sequence counter row must exist before the first order;
    // creating it here keeps order placement free of insert-or-race logic.
    let existing = SystemCounter::find()
        .filter(system_counter::Column::Name.eq(ORDER_SEQUENCE_COUNTER))
        .one(db)
        .await?;
    if existing.is_none() {
        let counter = system_counter::ActiveModel {
            name: Set(ORDER_SEQUENCE_COUNTER.to_string()),
            value: Set(0),
            ..Default::default()
        };
        counter.insert(db).await?;
    }

    Ok(())
}
