//! Order screen: status lifecycle and item submission.
//!
//! One `OrderScreen` backs a single open order screen: the last
//! backend-confirmed `Order`, the line-item editing session for its items,
//! and the in-flight guards that keep at most one mutating request per
//! order outstanding (the UI disables the status select and save button
//! while one is pending).
//!
//! Every successful mutation replaces the whole cached order from the
//! backend's response; a failed one leaves both the cached order and the
//! working copy exactly as they were.

use reqwest::Method;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Order, OrderList, OrderStatus, OrderStatusUpdate, OrderUpdate, OrdersQuery};
use crate::session::{EditError, ItemSession};

const ORDERS_PATH: &str = "/v1/admin/orders";

fn order_path(order_id: &str) -> String {
    format!("{ORDERS_PATH}/{order_id}")
}

fn status_path(order_id: &str) -> String {
    format!("{ORDERS_PATH}/{order_id}/status")
}

fn items_path(order_id: &str) -> String {
    format!("{ORDERS_PATH}/{order_id}/items")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure surfaced by an order screen operation.
#[derive(Debug, Error)]
pub enum OrderScreenError {
    /// A status update for this order is still in flight; the new request
    /// was not issued.
    #[error("A status update for this order is already in progress")]
    TransitionInFlight,
    /// An item save for this order is still in flight; the new request was
    /// not issued.
    #[error("An item save for this order is already in progress")]
    SaveInFlight,
    /// Local validation failure; nothing was sent to the backend.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// Backend rejection or transport failure; local state is preserved.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Fetch a page of orders for the table view.
pub async fn list_orders(client: &ApiClient, query: &OrdersQuery) -> Result<OrderList, ApiError> {
    client
        .request_with_query(Method::GET, ORDERS_PATH, &query.to_pairs(), None)
        .await
}

// ---------------------------------------------------------------------------
// Order screen
// ---------------------------------------------------------------------------

/// The client-side handle for one open order.
#[derive(Debug, Clone)]
pub struct OrderScreen {
    order: Order,
    session: ItemSession,
    status_updating: bool,
    saving_items: bool,
}

impl OrderScreen {
    /// Load the order from the backend and open a screen for it.
    pub async fn load(client: &ApiClient, order_id: &str) -> Result<Self, ApiError> {
        let order: Order = client
            .request(Method::GET, &order_path(order_id), None)
            .await?;
        info!(order_id = %order.id, status = ?order.status, "order loaded");
        Ok(Self::from_order(order))
    }

    /// Open a screen for an already-fetched order.
    pub fn from_order(order: Order) -> Self {
        let session = ItemSession::new(order.items.clone());
        Self {
            order,
            session,
            status_updating: false,
            saving_items: false,
        }
    }

    /// The cached order, as last confirmed by the backend.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Current confirmed status. Never an optimistic guess: a requested
    /// transition shows up here only once the backend echoes it.
    pub fn status(&self) -> OrderStatus {
        self.order.status
    }

    pub fn session(&self) -> &ItemSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ItemSession {
        &mut self.session
    }

    /// Whether a status transition is outstanding (the status select stays
    /// disabled while this is true).
    pub fn is_transition_pending(&self) -> bool {
        self.status_updating
    }

    /// Whether an item save is outstanding (the save button stays disabled
    /// while this is true).
    pub fn is_save_pending(&self) -> bool {
        self.saving_items
    }

    /// Request a status transition.
    ///
    /// Deliberately permissive: no client-side allow-list; the backend is
    /// the authority on which transitions are legal. On success the whole
    /// cached order is replaced from the response. On failure the displayed
    /// status is unchanged and the error message is surfaced.
    pub async fn request_transition(
        &mut self,
        client: &ApiClient,
        next: OrderStatus,
    ) -> Result<&Order, OrderScreenError> {
        if self.status_updating {
            return Err(OrderScreenError::TransitionInFlight);
        }
        self.status_updating = true;
        let result = client
            .request::<Order>(
                Method::POST,
                &status_path(&self.order.id),
                Some(json!(OrderStatusUpdate { status: next })),
            )
            .await;
        self.status_updating = false;

        match result {
            Ok(order) => {
                info!(
                    order_id = %order.id,
                    status = ?order.status,
                    "order status updated"
                );
                self.adopt(order);
                Ok(&self.order)
            }
            Err(err) => {
                warn!(
                    order_id = %self.order.id,
                    requested = ?next,
                    error = %err,
                    "status update failed, keeping confirmed status"
                );
                Err(err.into())
            }
        }
    }

    /// Commit the working copy as a single replace-all request.
    ///
    /// The backend receives the complete desired item list every time, so
    /// the client never tracks per-item create/update/delete operations.
    /// On success the whole cached order is replaced and the session
    /// returns to viewing with the server's list as the new baseline. On
    /// failure the session stays in editing with the working copy intact.
    pub async fn save_items(&mut self, client: &ApiClient) -> Result<&Order, OrderScreenError> {
        if self.saving_items {
            return Err(OrderScreenError::SaveInFlight);
        }
        let items = self.session.save_payload()?;

        self.saving_items = true;
        let result = client
            .request::<Order>(
                Method::PUT,
                &items_path(&self.order.id),
                Some(json!({ "items": items })),
            )
            .await;
        self.saving_items = false;

        match result {
            Ok(order) => {
                info!(
                    order_id = %order.id,
                    items = order.items.len(),
                    total = %order.total,
                    "order items saved"
                );
                self.session.commit(order.items.clone());
                self.order = order;
                Ok(&self.order)
            }
            Err(err) => {
                warn!(
                    order_id = %self.order.id,
                    error = %err,
                    "item save failed, keeping working copy"
                );
                Err(err.into())
            }
        }
    }

    /// Patch customer/delivery fields. The response replaces the whole
    /// cached order; an active item editing session keeps its working copy.
    pub async fn update_details(
        &mut self,
        client: &ApiClient,
        update: &OrderUpdate,
    ) -> Result<&Order, OrderScreenError> {
        let body = serde_json::to_value(update)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let order: Order = client
            .request(Method::PATCH, &order_path(&self.order.id), Some(body))
            .await?;
        info!(order_id = %order.id, "order details updated");
        self.adopt(order);
        Ok(&self.order)
    }

    /// Replace the cached order with an authoritative snapshot, moving the
    /// session's committed baseline without dropping an active working copy.
    fn adopt(&mut self, order: Order) {
        self.session.rebase(order.items.clone());
        self.order = order;
    }

    #[cfg(test)]
    fn mark_transition_pending(&mut self) {
        self.status_updating = true;
    }

    #[cfg(test)]
    fn mark_save_pending(&mut self) {
        self.saving_items = true;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
