//! Core business logic - framework-agnostic ordering operations.
//!
//! Everything here takes a database connection (or an open transaction) and
//! returns structured data; no user-interface concerns leak in. The cart and
//! checkout modules are client-session state, the rest are server-side
//! operations against the shared store.

/// Append-only activity log writes and queries
pub mod audit;
/// Session-scoped cart / order-draft state
pub mod cart;
/// Menu catalog queries and administration
pub mod catalog;
/// Checkout step machine gating order submission
pub mod checkout;
/// Order placement, queries, and status lifecycle
pub mod order;
/// Customer reviews and moderation
pub mod review;
/// One-time-code issuance and verification
pub mod verification;
