use dotenvy::dotenv;
use everest_kitchen::{
    config,
    core::catalog::{self, MenuFilter},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings (checkout parameters + seed menu)
    let settings = config::settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;
    info!("Configuration loaded");

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established"))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed the menu (idempotent)
    config::seed::seed_menu_items(&db, &settings)
        .await
        .inspect_err(|e| error!("Failed to seed menu items: {e}"))?;

    let active_items = catalog::list_menu_items(
        &db,
        &MenuFilter {
            is_active: Some(true),
            ..Default::default()
        },
    )
    .await?;
    info!(
        "Ready: {} active menu items, delivery fee {:.2}, order prefix {}",
        active_items.len(),
        settings.checkout.delivery_fee,
        settings.checkout.order_number_prefix
    );

    Ok(())
}
