//! One-time-code verification business logic.
//!
//! Checkout gates order submission behind a short-lived numeric code sent to
//! the customer's phone. Codes are issued server-side with an expiry and an
//! attempt limit; re-issuing a code voids any outstanding one for the same
//! phone. The actual delivery channel (SMS, email) sits behind the
//! [`CodeSender`] trait; no provider is assumed.

use crate::{
    config::settings::CheckoutSettings,
    entities::{VerificationCode, verification_code},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Number of digits in an issued code.
const CODE_DIGITS: usize = 6;

/// Boundary to the notification channel that delivers codes to customers.
pub trait CodeSender: Send + Sync {
    /// Delivers `code` to `phone`.
    fn send(&self, phone: &str, code: &str) -> Result<()>;
}

/// [`CodeSender`] that logs instead of sending.
///
/// Stands in for a real SMS/email provider in development and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSender;

impl CodeSender for TracingSender {
    fn send(&self, phone: &str, code: &str) -> Result<()> {
        info!("Verification code for {phone}: {code}");
        Ok(())
    }
}

/// Issues a fresh code for the phone number and hands it to the sender.
///
/// Any outstanding code for the same phone is voided first, so re-issuing
/// doubles as the "resend code" action. The code is numeric with leading
/// zeros kept.
pub async fn issue_code(
    db: &DatabaseConnection,
    sender: &dyn CodeSender,
    phone: &str,
    settings: &CheckoutSettings,
) -> Result<verification_code::Model> {
    if phone.trim().is_empty() {
        return Err(Error::validation("Phone number is required"));
    }

    void_outstanding_codes(db, phone).await?;

    let code = generate_code()?;
    let now = chrono::Utc::now();
    let model = verification_code::ActiveModel {
        phone: Set(phone.trim().to_string()),
        code: Set(code.clone()),
        expires_at: Set(now + chrono::Duration::minutes(settings.otp_ttl_minutes)),
        attempts: Set(0),
        consumed: Set(false),
        created_at: Set(now),
        ..Default::default()
    };
    let created = model.insert(db).await?;

    sender.send(&created.phone, &code)?;

    Ok(created)
}

/// Checks a user-entered code against the newest outstanding one.
///
/// On a match the code is consumed and cannot be reused. A mismatch counts
/// one attempt; once the attempt limit is reached the code is voided and a
/// new one must be requested. All failure modes are recoverable - the
/// caller's order draft survives.
///
/// # Errors
/// [`Error::VerificationFailed`] when no code is outstanding, the code is
/// expired, the attempt limit was reached, or the entered code is wrong.
pub async fn verify_code(
    db: &DatabaseConnection,
    phone: &str,
    submitted: &str,
    settings: &CheckoutSettings,
) -> Result<()> {
    let current = VerificationCode::find()
        .filter(verification_code::Column::Phone.eq(phone.trim()))
        .filter(verification_code::Column::Consumed.eq(false))
        .order_by_desc(verification_code::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| Error::VerificationFailed {
            reason: "No code was issued for this phone number".to_string(),
        })?;

    if current.expires_at < chrono::Utc::now() {
        return Err(Error::VerificationFailed {
            reason: "Code has expired, request a new one".to_string(),
        });
    }

    if current.attempts >= settings.otp_max_attempts {
        return Err(Error::VerificationFailed {
            reason: "Too many attempts, request a new code".to_string(),
        });
    }

    if current.code != submitted.trim() {
        // Commutative increment, so concurrent wrong guesses never lose an
        // update and stretch the attempt limit.
        use sea_orm::sea_query::Expr;
        VerificationCode::update_many()
            .col_expr(
                verification_code::Column::Attempts,
                Expr::col(verification_code::Column::Attempts).add(1),
            )
            .filter(verification_code::Column::Id.eq(current.id))
            .exec(db)
            .await?;

        let attempts = VerificationCode::find_by_id(current.id)
            .one(db)
            .await?
            .map_or(current.attempts + 1, |code| code.attempts);
        let remaining = (settings.otp_max_attempts - attempts).max(0);

        return Err(Error::VerificationFailed {
            reason: format!("Wrong code, {remaining} attempts remaining"),
        });
    }

    let mut active: verification_code::ActiveModel = current.into();
    active.consumed = Set(true);
    active.update(db).await?;

    Ok(())
}

/// Marks every unconsumed code for the phone as consumed.
async fn void_outstanding_codes(db: &DatabaseConnection, phone: &str) -> Result<()> {
    use sea_orm::sea_query::Expr;

    VerificationCode::update_many()
        .col_expr(verification_code::Column::Consumed, Expr::value(true))
        .filter(verification_code::Column::Phone.eq(phone.trim()))
        .filter(verification_code::Column::Consumed.eq(false))
        .exec(db)
        .await?;

    Ok(())
}

/// Generates a numeric code with [`CODE_DIGITS`] digits, leading zeros kept.
///
/// Bytes >= 250 are discarded so every digit is equally likely.
fn generate_code() -> Result<String> {
    let mut digits = String::with_capacity(CODE_DIGITS);
    while digits.len() < CODE_DIGITS {
        let mut bytes = [0u8; CODE_DIGITS];
        getrandom::fill(&mut bytes).map_err(|e| Error::Config {
            message: format!("Failed to generate verification code: {e}"),
        })?;
        for b in bytes {
            if b < 250 && digits.len() < CODE_DIGITS {
                digits.push(char::from(b'0' + (b % 10)));
            }
        }
    }
    Ok(digits)
}
