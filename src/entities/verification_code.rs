//! Verification code entity - Short-lived one-time codes for checkout.
//!
//! A code is issued to a phone number, expires after a configured ttl, and
//! tolerates a limited number of wrong attempts before it is voided. Codes
//! are stored as numeric strings so leading zeros survive.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Verification code database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "verification_codes")]
pub struct Model {
    /// Unique identifier for the code
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Phone number the code was sent to
    pub phone: String,
    /// The 6-digit numeric code, leading zeros kept
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTimeUtc,
    /// How many wrong guesses have been made against this code
    pub attempts: i32,
    /// True once the code was redeemed or voided by a newer code
    pub consumed: bool,
    /// When the code was issued
    pub created_at: DateTimeUtc,
}

/// `VerificationCode` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
