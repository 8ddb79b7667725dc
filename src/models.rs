//! Typed domain model for the admin order console.
//!
//! Field names mirror the admin backend's JSON wire format exactly
//! (snake_case), so every struct round-trips through serde without rename
//! maps. The backend owns all durable state; these types are the client's
//! cached snapshots and request payloads.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Order status / delivery method
// ---------------------------------------------------------------------------

/// Lifecycle status of an order.
///
/// The client imposes no transition graph: any status may be requested from
/// any other, and the backend decides whether the transition is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Processing,
    Paid,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order, for the status select.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Created,
        OrderStatus::Processing,
        OrderStatus::Paid,
        OrderStatus::Fulfilled,
        OrderStatus::Cancelled,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Processing => "Processing",
            OrderStatus::Paid => "Paid",
            OrderStatus::Fulfilled => "Fulfilled",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Pickup,
    Courier,
    Cdek,
}

impl DeliveryMethod {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "Pickup",
            DeliveryMethod::Courier => "Courier",
            DeliveryMethod::Cdek => "CDEK",
        }
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// A single line on an order.
///
/// `price` is the unit price captured when the item entered the order, and
/// `total` must always equal `price * quantity` rounded to two decimals.
/// The remaining fields are denormalised catalog data kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
    /// Unit price as a decimal string (e.g. `"650.00"`).
    pub price: String,
    /// Line total as a decimal string.
    pub total: String,
    pub product_name: String,
    pub variant_weight: String,
    #[serde(default)]
    pub image: String,
}

/// A customer order as returned by the backend.
///
/// The client holds one cached copy per open order screen and replaces it
/// wholesale from every authoritative response; it is never mutated in
/// place outside the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub user_id: Option<i64>,
    pub delivery: DeliveryMethod,
    pub address: Option<String>,
    pub comment: Option<String>,
    /// Order total as a decimal string. Authoritative; the client never
    /// substitutes its own arithmetic for this value.
    pub total: String,
    pub status: OrderStatus,
    /// Creation timestamp as an ISO-8601 string, when the backend sends one.
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Paginated order listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderList {
    pub total: u64,
    pub items: Vec<Order>,
}

/// Partial customer/delivery patch for an order. Only the populated fields
/// are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of a status transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// The reduced per-item tuple sent on a replace-all item save. Display
/// fields and draft tags never reach the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
    pub price: String,
}

/// Filters for the order table listing.
#[derive(Debug, Clone, Default)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
    pub user_id: Option<i64>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl OrdersQuery {
    /// Query-string pairs for the populated filters.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            // serde renders the wire form; strip the JSON quotes.
            let wire = serde_json::to_string(&status).unwrap_or_default();
            pairs.push(("status", wire.trim_matches('"').to_string()));
        }
        if let Some(user_id) = self.user_id {
            pairs.push(("user_id", user_id.to_string()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A purchasable unit of a product with its own price and active flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    /// Display weight (e.g. `"50 g"`).
    pub weight: String,
    /// Current price as a decimal string.
    pub price: String,
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// A catalog product as shown in the "add item" picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub is_active: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

/// Paginated product listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    pub total: u64,
    pub items: Vec<Product>,
}
