//! Checkout step machine.
//!
//! Gates order submission behind a strictly linear sequence:
//! `Review -> Details -> Verification -> Confirmed`. Each forward move has an
//! exit guard, backward navigation is allowed one step at a time, and nothing
//! is persisted server-side until the one-time code verifies and the
//! submission goes through. `Confirmed` is terminal for a flow instance; a
//! fresh draft starts a new one.

use crate::{
    config::settings::CheckoutSettings,
    core::{
        cart::Cart,
        order::{self, OrderType},
        verification::{self, CodeSender},
    },
    entities::{order as order_entity, user},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Position in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Reviewing the cart contents
    Review,
    /// Entering contact and delivery details
    Details,
    /// Waiting for the one-time code
    Verification,
    /// Order submitted; terminal
    Confirmed,
}

/// One checkout flow instance wrapping an order draft.
#[derive(Debug)]
pub struct Checkout {
    cart: Cart,
    step: CheckoutStep,
}

impl Checkout {
    /// Starts a new flow at the review step.
    #[must_use]
    pub const fn new(cart: Cart) -> Self {
        Self {
            cart,
            step: CheckoutStep::Review,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The wrapped draft.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the draft for edits during review and details.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Review -> Details. Guard: the cart must be non-empty.
    pub fn proceed_to_details(&mut self) -> Result<()> {
        if self.step != CheckoutStep::Review {
            return Err(step_error(self.step, "proceed to details"));
        }
        if self.cart.is_empty() {
            return Err(Error::validation("Cart is empty"));
        }
        self.step = CheckoutStep::Details;
        Ok(())
    }

    /// Details -> Verification. Guard: name and phone must be filled in, and
    /// a delivery order needs an address.
    pub fn proceed_to_verification(&mut self) -> Result<()> {
        if self.step != CheckoutStep::Details {
            return Err(step_error(self.step, "proceed to verification"));
        }

        let info = self.cart.customer_info();
        if info.name.trim().is_empty() {
            return Err(Error::validation("Customer name is required"));
        }
        if info.phone.trim().is_empty() {
            return Err(Error::validation("Customer phone is required"));
        }
        if self.cart.order_type() == OrderType::Delivery
            && info
                .address
                .as_deref()
                .is_none_or(|addr| addr.trim().is_empty())
        {
            return Err(Error::validation(
                "Delivery orders require a delivery address",
            ));
        }

        self.step = CheckoutStep::Verification;
        Ok(())
    }

    /// Steps back: Details -> Review or Verification -> Details.
    pub fn back(&mut self) -> Result<()> {
        self.step = match self.step {
            CheckoutStep::Details => CheckoutStep::Review,
            CheckoutStep::Verification => CheckoutStep::Details,
            other => return Err(step_error(other, "go back")),
        };
        Ok(())
    }

    /// Issues (or re-issues) a one-time code to the customer's phone.
    ///
    /// Available at any time while in the verification step; re-requesting is
    /// the "resend code" action.
    pub async fn request_code(
        &self,
        db: &DatabaseConnection,
        sender: &dyn CodeSender,
        settings: &CheckoutSettings,
    ) -> Result<()> {
        if self.step != CheckoutStep::Verification {
            return Err(step_error(self.step, "request a verification code"));
        }
        verification::issue_code(db, sender, &self.cart.customer_info().phone, settings).await?;
        Ok(())
    }

    /// Verifies the entered code and, on success, submits the order.
    ///
    /// On a wrong code the flow stays in the verification step and the draft
    /// survives, so the user can retry or request a new code. On success
    /// exactly one submission is issued and the flow reaches its terminal
    /// step.
    ///
    /// # Errors
    /// * [`Error::VerificationFailed`] - code mismatch/expiry; state unchanged
    /// * Any [`order::place_order`] error; state unchanged, nothing persisted
    pub async fn confirm(
        &mut self,
        db: &DatabaseConnection,
        customer: &user::Model,
        entered_code: &str,
        settings: &CheckoutSettings,
    ) -> Result<order_entity::Model> {
        if self.step != CheckoutStep::Verification {
            return Err(step_error(self.step, "confirm the order"));
        }

        verification::verify_code(db, &self.cart.customer_info().phone, entered_code, settings)
            .await?;

        let request = self.cart.to_order_request(None);
        let placed = order::place_order(db, settings, customer, request).await?;

        self.step = CheckoutStep::Confirmed;
        Ok(placed)
    }
}

fn step_error(step: CheckoutStep, action: &str) -> Error {
    Error::validation(format!("Cannot {action} from the {step:?} step"))
}
