//! Cart / order-draft state.
//!
//! The cart is a session-scoped object owned by the caller - there is no
//! module-level store. Each mutation returns a [`CartNotice`] describing the
//! transient notification the UI should surface, and the running total is
//! always recomputed from the lines, never cached. Persistence across page
//! loads goes through the injected [`CartStore`] adapter.
//!
//! Line prices are display snapshots taken at add-time; the server recomputes
//! every price at submission and ignores these entirely.

use crate::{
    core::order::{OrderLine, OrderRequest, OrderType},
    entities::menu_item,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Customer contact fields collected during checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name
    pub name: String,
    /// Customer phone, used for verification
    pub phone: String,
    /// Optional email
    pub email: Option<String>,
    /// Delivery address, required for delivery orders
    pub address: Option<String>,
}

/// Partial update for [`CustomerInfo`]; unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct CustomerInfoUpdate {
    /// New name, if changing
    pub name: Option<String>,
    /// New phone, if changing
    pub phone: Option<String>,
    /// New email, if changing
    pub email: Option<String>,
    /// New address, if changing
    pub address: Option<String>,
}

/// One selected item with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Id of the selected menu item
    pub menu_item_id: i64,
    /// Item name for display
    pub name: String,
    /// Price snapshot taken when the item was added (display only)
    pub unit_price: f64,
    /// Selected quantity, always >= 1
    pub quantity: i32,
    /// Optional per-line notes
    pub notes: Option<String>,
}

/// Transient user notification produced by a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    /// An item was added (or its quantity bumped by re-adding)
    ItemAdded {
        /// Name of the added item
        name: String,
    },
    /// A line was removed
    ItemRemoved {
        /// Name of the removed item
        name: String,
    },
    /// A line's quantity changed
    QuantityUpdated {
        /// Name of the affected item
        name: String,
        /// The new quantity
        quantity: i32,
    },
    /// The whole cart was emptied
    CartCleared,
}

impl std::fmt::Display for CartNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemAdded { name } => write!(f, "{name} added to cart"),
            Self::ItemRemoved { name } => write!(f, "{name} removed from cart"),
            Self::QuantityUpdated { name, quantity } => {
                write!(f, "{name} quantity set to {quantity}")
            }
            Self::CartCleared => write!(f, "Cart cleared"),
        }
    }
}

/// The client-held order draft: selected lines, order type, contact info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    order_type: OrderType,
    customer_info: CustomerInfo,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates an empty pickup cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            order_type: OrderType::Pickup,
            customer_info: CustomerInfo {
                name: String::new(),
                phone: String::new(),
                email: None,
                address: None,
            },
        }
    }

    /// The current lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The selected order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// The collected contact fields.
    #[must_use]
    pub const fn customer_info(&self) -> &CustomerInfo {
        &self.customer_info
    }

    /// Adds a menu item: an existing line gets quantity + 1, otherwise a new
    /// line with quantity 1 and a price snapshot is appended.
    pub fn add_item(&mut self, item: &menu_item::Model) -> CartNotice {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|line| line.menu_item_id == item.id)
        {
            existing.quantity += 1;
        } else {
            self.lines.push(CartLine {
                menu_item_id: item.id,
                name: item.name.clone(),
                unit_price: item.price,
                quantity: 1,
                notes: None,
            });
        }
        CartNotice::ItemAdded {
            name: item.name.clone(),
        }
    }

    /// Sets a line's quantity; a quantity of zero or less removes the line.
    ///
    /// Returns `None` when no line references the given item.
    pub fn update_quantity(&mut self, menu_item_id: i64, quantity: i32) -> Option<CartNotice> {
        if quantity <= 0 {
            return self.remove_item(menu_item_id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)?;
        line.quantity = quantity;
        Some(CartNotice::QuantityUpdated {
            name: line.name.clone(),
            quantity,
        })
    }

    /// Drops a line. Returns `None` when no line references the given item.
    pub fn remove_item(&mut self, menu_item_id: i64) -> Option<CartNotice> {
        let position = self
            .lines
            .iter()
            .position(|line| line.menu_item_id == menu_item_id)?;
        let removed = self.lines.remove(position);
        Some(CartNotice::ItemRemoved { name: removed.name })
    }

    /// Empties the lines and resets contact fields. Order type is kept.
    pub fn clear(&mut self) -> CartNotice {
        self.lines.clear();
        self.customer_info = CustomerInfo::default();
        CartNotice::CartCleared
    }

    /// Sets the order type.
    pub const fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
    }

    /// Applies a partial contact-info update.
    pub fn update_customer_info(&mut self, update: CustomerInfoUpdate) {
        if let Some(name) = update.name {
            self.customer_info.name = name;
        }
        if let Some(phone) = update.phone {
            self.customer_info.phone = phone;
        }
        if let Some(email) = update.email {
            self.customer_info.email = Some(email);
        }
        if let Some(address) = update.address {
            self.customer_info.address = Some(address);
        }
    }

    /// The running subtotal, recomputed from the lines on every call.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.unit_price * f64::from(line.quantity))
            .sum()
    }

    /// Display total: subtotal plus the delivery fee for delivery orders.
    ///
    /// Display-time only; the server recomputes the authoritative total from
    /// the catalog at submission.
    #[must_use]
    pub fn display_total(&self, delivery_fee: f64) -> f64 {
        match self.order_type {
            OrderType::Delivery => self.subtotal() + delivery_fee,
            OrderType::Pickup => self.subtotal(),
        }
    }

    /// Builds the submission payload.
    ///
    /// Only item ids and quantities cross the boundary - the snapshot prices
    /// stay client-side by construction.
    #[must_use]
    pub fn to_order_request(&self, notes: Option<String>) -> OrderRequest {
        OrderRequest {
            order_type: self.order_type,
            customer_name: self.customer_info.name.clone(),
            customer_phone: self.customer_info.phone.clone(),
            customer_email: self.customer_info.email.clone(),
            address: self.customer_info.address.clone(),
            notes,
            items: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    menu_item_id: line.menu_item_id,
                    quantity: line.quantity,
                    notes: line.notes.clone(),
                })
                .collect(),
        }
    }
}

/// Injected persistence adapter for carts (local storage, server session...).
pub trait CartStore: Send + Sync {
    /// Persists the cart.
    fn save(&self, cart: &Cart) -> Result<()>;
    /// Loads the previously saved cart, if any.
    fn load(&self) -> Result<Option<Cart>>;
}

/// In-memory [`CartStore`] for tests and single-process sessions.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    slot: Mutex<Option<Cart>>,
}

impl CartStore for MemoryCartStore {
    fn save(&self, cart: &Cart) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| Error::Config {
            message: "Cart store lock poisoned".to_string(),
        })?;
        *slot = Some(cart.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Cart>> {
        let slot = self.slot.lock().map_err(|_| Error::Config {
            message: "Cart store lock poisoned".to_string(),
        })?;
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn menu_item(id: i64, name: &str, price: f64) -> menu_item::Model {
        let now = chrono::Utc::now();
        menu_item::Model {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            category: "momos".to_string(),
            is_vegetarian: false,
            spice_level: 1,
            is_active: true,
            order_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_add_item_appends_then_increments() {
        let mut cart = Cart::new();
        let momos = menu_item(1, "Traditional Chicken Momos", 12.90);

        let notice = cart.add_item(&momos);
        assert_eq!(
            notice,
            CartNotice::ItemAdded {
                name: "Traditional Chicken Momos".to_string()
            }
        );
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.add_item(&momos);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal(), 25.80);
    }

    #[test]
    fn test_subtotal_always_recomputed() {
        let mut cart = Cart::new();
        let momos = menu_item(1, "Traditional Chicken Momos", 12.90);
        let chai = menu_item(2, "Masala Chai", 3.50);

        cart.add_item(&momos);
        cart.add_item(&chai);
        cart.add_item(&momos);
        cart.update_quantity(2, 4);
        cart.remove_item(1);
        cart.add_item(&momos);

        // Total matches the sum over current lines after any sequence
        let expected: f64 = cart
            .lines()
            .iter()
            .map(|line| line.unit_price * f64::from(line.quantity))
            .sum();
        assert_eq!(cart.subtotal(), expected);
        assert_eq!(cart.subtotal(), 4.0 * 3.50 + 12.90);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let chai = menu_item(2, "Masala Chai", 3.50);

        let mut via_update = Cart::new();
        via_update.add_item(&chai);
        let notice = via_update.update_quantity(2, 0);
        assert_eq!(
            notice,
            Some(CartNotice::ItemRemoved {
                name: "Masala Chai".to_string()
            })
        );

        let mut via_remove = Cart::new();
        via_remove.add_item(&chai);
        via_remove.remove_item(2);

        assert_eq!(via_update.lines(), via_remove.lines());
        assert!(via_update.is_empty());
        assert_eq!(via_update.subtotal(), 0.0);
    }

    #[test]
    fn test_update_quantity_unknown_item_is_none() {
        let mut cart = Cart::new();
        assert!(cart.update_quantity(42, 3).is_none());
        assert!(cart.remove_item(42).is_none());
    }

    #[test]
    fn test_clear_resets_lines_and_contact_info() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item(1, "Vegetable Momos", 10.90));
        cart.set_order_type(OrderType::Delivery);
        cart.update_customer_info(CustomerInfoUpdate {
            name: Some("Anita".to_string()),
            phone: Some("+49 151 1234567".to_string()),
            ..Default::default()
        });

        let notice = cart.clear();
        assert_eq!(notice, CartNotice::CartCleared);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0.0);
        assert_eq!(cart.customer_info().name, "");
        // Order type survives a clear
        assert_eq!(cart.order_type(), OrderType::Delivery);
    }

    #[test]
    fn test_partial_customer_info_update() {
        let mut cart = Cart::new();
        cart.update_customer_info(CustomerInfoUpdate {
            name: Some("Anita".to_string()),
            phone: Some("+49 151 1234567".to_string()),
            ..Default::default()
        });
        cart.update_customer_info(CustomerInfoUpdate {
            address: Some("Marienplatz 8".to_string()),
            ..Default::default()
        });

        let info = cart.customer_info();
        assert_eq!(info.name, "Anita");
        assert_eq!(info.phone, "+49 151 1234567");
        assert_eq!(info.address.as_deref(), Some("Marienplatz 8"));
    }

    #[test]
    fn test_display_total_applies_fee_only_for_delivery() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item(1, "Dal Bhat Tarkari", 14.90));

        assert_eq!(cart.display_total(3.50), 14.90);
        cart.set_order_type(OrderType::Delivery);
        assert!((cart.display_total(3.50) - 18.40).abs() < 1e-9);
    }

    #[test]
    fn test_order_request_carries_no_prices() {
        let mut cart = Cart::new();
        let momos = menu_item(1, "Traditional Chicken Momos", 12.90);
        cart.add_item(&momos);
        cart.add_item(&momos);
        cart.set_order_type(OrderType::Delivery);
        cart.update_customer_info(CustomerInfoUpdate {
            name: Some("Anita".to_string()),
            phone: Some("+49 151 1234567".to_string()),
            address: Some("Marienplatz 8".to_string()),
            ..Default::default()
        });

        let request = cart.to_order_request(Some("Extra spicy please".to_string()));
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].menu_item_id, 1);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.customer_name, "Anita");
        assert_eq!(request.notes.as_deref(), Some("Extra spicy please"));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCartStore::default();
        assert!(store.load().unwrap().is_none());

        let mut cart = Cart::new();
        cart.add_item(&menu_item(1, "Masala Chai", 3.50));
        store.save(&cart).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.lines(), cart.lines());
    }
}
