/// Database connection and table creation
pub mod database;

/// Menu seeding from settings
pub mod seed;

/// Application settings loading from config.toml
pub mod settings;
