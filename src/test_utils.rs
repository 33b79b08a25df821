//! Shared test utilities for `EverestKitchen`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::settings::CheckoutSettings,
    core::verification::CodeSender,
    entities::{menu_item, user},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::sync::Mutex;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Default checkout settings: 3.50 delivery fee, "EK" prefix, 5 minute ttl,
/// 3 attempts.
#[must_use]
pub fn test_settings() -> CheckoutSettings {
    CheckoutSettings::default()
}

/// Creates a user with the given name, email, and role.
pub async fn create_custom_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    role: &str,
) -> Result<user::Model> {
    let model = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone: Set(None),
        role: Set(role.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates a customer-role user with default contact details.
pub async fn create_test_customer(db: &DatabaseConnection) -> Result<user::Model> {
    create_custom_user(db, "Test Customer", "customer@example.com", "CUSTOMER").await
}

/// Creates an admin-role user.
pub async fn create_test_admin(db: &DatabaseConnection) -> Result<user::Model> {
    create_custom_user(db, "Test Admin", "admin@example.com", "ADMIN").await
}

/// Creates a staff-role user.
pub async fn create_test_staff(db: &DatabaseConnection) -> Result<user::Model> {
    create_custom_user(db, "Test Staff", "staff@example.com", "STAFF").await
}

/// Creates an active menu item with sensible defaults.
///
/// # Defaults
/// * `category`: "momos"
/// * `is_vegetarian`: false
/// * `spice_level`: 1
pub async fn create_test_menu_item(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
) -> Result<menu_item::Model> {
    let now = chrono::Utc::now();
    let model = menu_item::ActiveModel {
        name: Set(name.to_string()),
        description: Set(format!("{name} (test item)")),
        price: Set(price),
        category: Set("momos".to_string()),
        is_vegetarian: Set(false),
        spice_level: Set(1),
        is_active: Set(true),
        order_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// [`CodeSender`] that records issued codes instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    /// All `(phone, code)` pairs sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The most recently sent code, if any.
    #[must_use]
    pub fn last_code(&self) -> Option<String> {
        self.sent().last().map(|(_, code)| code.clone())
    }
}

impl CodeSender for RecordingSender {
    fn send(&self, phone: &str, code: &str) -> Result<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((phone.to_string(), code.to_string()));
        }
        Ok(())
    }
}
