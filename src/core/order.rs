//! Order business logic - placement, queries, and the status lifecycle.
//!
//! Order placement is the trust boundary of the system: the request carries
//! item ids and quantities but no prices, and the total is recomputed from
//! the catalog inside a single database transaction together with the line
//! snapshots, the per-item order counters, and the audit entry. A failure at
//! any point leaves no partial state behind.

use crate::{
    config::database::ORDER_SEQUENCE_COUNTER,
    config::settings::CheckoutSettings,
    core::{audit, catalog},
    entities::{Order, SystemCounter, order, order_item, system_counter, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Roles allowed to see all orders and drive the status lifecycle.
const STAFF_ROLES: [&str; 3] = ["ADMIN", "MANAGER", "STAFF"];

/// Whether the given role string is a staff-equivalent role.
#[must_use]
pub fn is_staff(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}

/// How an order will reach the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OrderType {
    /// Customer picks the order up at the restaurant
    Pickup,
    /// Order is delivered; a fixed surcharge applies
    Delivery,
}

impl OrderType {
    /// Storage representation of the order type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "PICKUP",
            Self::Delivery => "DELIVERY",
        }
    }
}

impl std::str::FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PICKUP" => Ok(Self::Pickup),
            "DELIVERY" => Ok(Self::Delivery),
            other => Err(Error::validation(format!("Invalid order type: {other}"))),
        }
    }
}

/// Server-managed order lifecycle status.
///
/// The lifecycle is linear with one shortcut (pickup orders skip the
/// delivery leg) and `Cancelled` reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Placed, not yet acknowledged by the kitchen
    Pending,
    /// Acknowledged by staff
    Confirmed,
    /// Being cooked
    Preparing,
    /// Ready for pickup or dispatch
    Ready,
    /// Courier is on the way
    OutForDelivery,
    /// Handed over to the customer (terminal)
    Completed,
    /// Abandoned by staff or customer (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Storage representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether moving from this status to `next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return false;
        }
        match (self, next) {
            (current, Self::Cancelled) => !current.is_terminal(),
            (Self::Pending, Self::Confirmed)
            | (Self::Confirmed, Self::Preparing)
            | (Self::Preparing, Self::Ready)
            | (Self::Ready, Self::OutForDelivery | Self::Completed)
            | (Self::OutForDelivery, Self::Completed) => true,
            _ => false,
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "PREPARING" => Ok(Self::Preparing),
            "READY" => Ok(Self::Ready),
            "OUT_FOR_DELIVERY" => Ok(Self::OutForDelivery),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(Error::validation(format!("Invalid order status: {other}"))),
        }
    }
}

/// One requested line of a proposed order.
///
/// Carries no price: the server looks up the authoritative current price.
#[derive(Debug, Clone)]
pub struct OrderLine {
    /// The menu item being ordered
    pub menu_item_id: i64,
    /// How many units, must be >= 1
    pub quantity: i32,
    /// Optional per-line notes
    pub notes: Option<String>,
}

/// A proposed order as submitted at the end of checkout.
///
/// Deliberately has no total or per-line price fields, so a tampering client
/// has nothing to tamper with.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Pickup or delivery
    pub order_type: OrderType,
    /// Customer name, required
    pub customer_name: String,
    /// Customer phone, required
    pub customer_phone: String,
    /// Optional customer email
    pub customer_email: Option<String>,
    /// Delivery address, required when `order_type` is delivery
    pub address: Option<String>,
    /// Free-form order notes
    pub notes: Option<String>,
    /// Requested lines, must be non-empty
    pub items: Vec<OrderLine>,
}

/// Filter for order listings. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    /// Only orders in this status
    pub status: Option<OrderStatus>,
    /// Only orders of this type
    pub order_type: Option<OrderType>,
}

/// Validates, prices, and persists a proposed order as one atomic unit.
///
/// Rejections happen in two stages: malformed payloads (empty item list,
/// non-positive quantity, missing contact fields or delivery address) fail
/// before any lookup; a missing or inactive menu item fails the whole
/// submission inside the transaction. On success the order, its line
/// snapshots, the per-item counter increments, and the `ORDER_CREATED` audit
/// entry commit together.
///
/// # Errors
/// * [`Error::Validation`] for malformed payloads, before any side effect
/// * [`Error::ItemUnavailable`] when any line references a missing or
///   inactive menu item; nothing is persisted
pub async fn place_order(
    db: &DatabaseConnection,
    settings: &CheckoutSettings,
    customer: &user::Model,
    request: OrderRequest,
) -> Result<order::Model> {
    validate_request(&request)?;

    let txn = db.begin().await?;

    // Price every line from the catalog, rejecting the whole submission on
    // the first unavailable item.
    let mut subtotal = 0.0;
    let mut priced_lines = Vec::with_capacity(request.items.len());
    for line in &request.items {
        let menu_item = crate::entities::MenuItem::find_by_id(line.menu_item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::ItemUnavailable {
                name: line.menu_item_id.to_string(),
            })?;

        if !menu_item.is_active {
            return Err(Error::ItemUnavailable {
                name: menu_item.name,
            });
        }

        subtotal += menu_item.price * f64::from(line.quantity);
        priced_lines.push((line, menu_item.price));
    }

    let delivery_fee = match request.order_type {
        OrderType::Delivery => settings.delivery_fee,
        OrderType::Pickup => 0.0,
    };
    let total = subtotal + delivery_fee;

    let order_number = next_order_number(&txn, &settings.order_number_prefix).await?;

    let order_model = order::ActiveModel {
        order_number: Set(order_number.clone()),
        customer_id: Set(customer.id),
        customer_name: Set(request.customer_name.trim().to_string()),
        customer_phone: Set(request.customer_phone.trim().to_string()),
        customer_email: Set(request.customer_email.clone()),
        order_type: Set(request.order_type.as_str().to_string()),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        total: Set(total),
        delivery_fee: Set(delivery_fee),
        address: Set(request.address.clone()),
        notes: Set(request.notes.clone()),
        estimated_time: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = order_model.insert(&txn).await?;

    for (line, price) in &priced_lines {
        let item_model = order_item::ActiveModel {
            order_id: Set(created.id),
            menu_item_id: Set(line.menu_item_id),
            quantity: Set(line.quantity),
            price: Set(*price),
            notes: Set(line.notes.clone()),
            ..Default::default()
        };
        item_model.insert(&txn).await?;

        catalog::increment_order_count_atomic(&txn, line.menu_item_id, i64::from(line.quantity))
            .await?;
    }

    let metadata = serde_json::json!({
        "total": total,
        "type": request.order_type.as_str(),
        "itemCount": request.items.len(),
    })
    .to_string();
    audit::append(
        &txn,
        customer.id,
        Some(created.id),
        audit::ORDER_CREATED,
        format!("Order {order_number} created"),
        Some(metadata),
    )
    .await?;

    txn.commit().await?;

    info!("Order created: {order_number} by {}", customer.email);

    Ok(created)
}

/// Lists orders visible to the actor, newest first.
///
/// Staff roles see every order; customers only their own.
pub async fn list_orders(
    db: &DatabaseConnection,
    actor: &user::Model,
    filter: &OrderFilter,
) -> Result<Vec<order::Model>> {
    let mut query = Order::find();

    if !is_staff(&actor.role) {
        query = query.filter(order::Column::CustomerId.eq(actor.id));
    }
    if let Some(status) = filter.status {
        query = query.filter(order::Column::Status.eq(status.as_str()));
    }
    if let Some(order_type) = filter.order_type {
        query = query.filter(order::Column::OrderType.eq(order_type.as_str()));
    }

    query
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a single order within the actor's authorized scope.
///
/// A customer asking for someone else's order gets [`Error::NotFound`], not
/// [`Error::Forbidden`], so order ids don't leak.
pub async fn get_order(
    db: &DatabaseConnection,
    actor: &user::Model,
    order_id: i64,
) -> Result<order::Model> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;

    if !is_staff(&actor.role) && order.customer_id != actor.id {
        return Err(Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        });
    }

    Ok(order)
}

/// Retrieves the line items of an order, in insertion order.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    crate::entities::OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves an order to a new lifecycle status.
///
/// Staff-only. The transition must be legal per
/// [`OrderStatus::can_transition_to`]; the status change and its
/// `ORDER_STATUS_UPDATED` audit entry commit atomically. `estimated_time` is
/// an advisory display string, not a scheduler input.
///
/// # Errors
/// * [`Error::Forbidden`] when the actor is not staff
/// * [`Error::NotFound`] when the order does not exist
/// * [`Error::Validation`] for an illegal transition
pub async fn update_order_status(
    db: &DatabaseConnection,
    actor: &user::Model,
    order_id: i64,
    new_status: OrderStatus,
    estimated_time: Option<String>,
) -> Result<order::Model> {
    if !is_staff(&actor.role) {
        return Err(Error::Forbidden {
            action: "update order status".to_string(),
        });
    }

    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;

    let current: OrderStatus = order.status.parse()?;
    if !current.can_transition_to(new_status) {
        return Err(Error::validation(format!(
            "Illegal status transition: {} -> {}",
            current.as_str(),
            new_status.as_str()
        )));
    }

    let order_number = order.order_number.clone();
    let previous = order.status.clone();

    let mut active: order::ActiveModel = order.into();
    active.status = Set(new_status.as_str().to_string());
    if let Some(eta) = estimated_time {
        active.estimated_time = Set(Some(eta));
    }
    let updated = active.update(&txn).await?;

    let metadata = serde_json::json!({
        "previousStatus": previous,
        "newStatus": new_status.as_str(),
    })
    .to_string();
    audit::append(
        &txn,
        actor.id,
        Some(updated.id),
        audit::ORDER_STATUS_UPDATED,
        format!(
            "Order {order_number} status updated to {}",
            new_status.as_str()
        ),
        Some(metadata),
    )
    .await?;

    txn.commit().await?;

    info!(
        "Order status updated: {order_number} to {} by {}",
        new_status.as_str(),
        actor.email
    );

    Ok(updated)
}

/// Draws the next order number from the database-backed sequence.
///
/// The counter row is updated with a single `value = value + 1` expression
/// and read back inside the caller's transaction. Under concurrent
/// submissions the row lock serializes the increments, so every transaction
/// observes its own value and numbers never collide.
async fn next_order_number<C>(conn: &C, prefix: &str) -> Result<String>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    SystemCounter::update_many()
        .col_expr(
            system_counter::Column::Value,
            Expr::col(system_counter::Column::Value).add(1),
        )
        .filter(system_counter::Column::Name.eq(ORDER_SEQUENCE_COUNTER))
        .exec(conn)
        .await?;

    let counter = SystemCounter::find()
        .filter(system_counter::Column::Name.eq(ORDER_SEQUENCE_COUNTER))
        .one(conn)
        .await?
        .ok_or_else(|| Error::Config {
            message: "Order sequence counter is missing".to_string(),
        })?;

    Ok(format!("{prefix}{:06}", counter.value))
}

fn validate_request(request: &OrderRequest) -> Result<()> {
    if request.items.is_empty() {
        return Err(Error::validation("Order must contain at least one item"));
    }
    if let Some(line) = request.items.iter().find(|line| line.quantity < 1) {
        return Err(Error::validation(format!(
            "Invalid quantity {} for menu item {}",
            line.quantity, line.menu_item_id
        )));
    }
    if request.customer_name.trim().is_empty() {
        return Err(Error::validation("Customer name is required"));
    }
    if request.customer_phone.trim().is_empty() {
        return Err(Error::validation("Customer phone is required"));
    }
    if request.order_type == OrderType::Delivery
        && request
            .address
            .as_deref()
            .is_none_or(|addr| addr.trim().is_empty())
    {
        return Err(Error::validation(
            "Delivery orders require a delivery address",
        ));
    }
    Ok(())
}
