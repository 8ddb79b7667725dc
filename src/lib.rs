//! Teahouse admin console — order composition and fulfillment core.
//!
//! Headless client library behind the admin console's order screen: the
//! order status lifecycle plus the line-item editing session used when an
//! operator reworks an order's items before persisting the change as a
//! whole. The admin backend owns all durable state; this crate holds one
//! cached order per open screen and replaces it wholesale from each
//! authoritative response.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod api;
pub mod catalog;
pub mod config;
pub mod format;
pub mod models;
pub mod money;
pub mod orders;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use catalog::{CatalogSnapshot, PickError};
pub use config::ApiConfig;
pub use models::{
    DeliveryMethod, Order, OrderItem, OrderList, OrderStatus, OrderUpdate, OrdersQuery, Product,
    ProductVariant,
};
pub use orders::{list_orders, OrderScreen, OrderScreenError};
pub use session::{DraftItem, EditError, ItemSession};

/// Initialize structured console logging.
///
/// Honours `RUST_LOG`; called once by the embedding application, not by
/// this library's own code paths.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,teahouse_admin_core=debug"));

    let console_layer = fmt::layer().with_target(true);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
