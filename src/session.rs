//! Line-item editing session.
//!
//! A reversible local working copy of one order's items. Every mutation is
//! purely local and applied synchronously in call order; nothing touches
//! the backend until the whole working copy is committed, and cancelling
//! always restores the last-committed list exactly.

use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogSnapshot, PickError};
use crate::models::{OrderItem, OrderItemPayload};
use crate::money;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Local validation failure inside an editing session. Normalised before
/// any network call; never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("No item at position {0}")]
    NoSuchItem(usize),
    #[error("Items can only be changed while editing")]
    NotEditing,
    #[error(transparent)]
    Pick(#[from] PickError),
}

// ---------------------------------------------------------------------------
// Draft items
// ---------------------------------------------------------------------------

/// A working-copy item, tagged by whether the backend has ever seen it.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftItem {
    /// Present in the last-committed item list.
    Committed(OrderItem),
    /// Added during this session; unknown to the backend until save.
    Added(OrderItem),
}

impl DraftItem {
    pub fn item(&self) -> &OrderItem {
        match self {
            DraftItem::Committed(item) | DraftItem::Added(item) => item,
        }
    }

    fn item_mut(&mut self) -> &mut OrderItem {
        match self {
            DraftItem::Committed(item) | DraftItem::Added(item) => item,
        }
    }

    /// Whether this item was added during the current session.
    pub fn is_new(&self) -> bool {
        matches!(self, DraftItem::Added(_))
    }
}

/// Session state: read-only committed view, or an active working copy.
#[derive(Debug, Clone, PartialEq)]
enum SessionState {
    Viewing,
    Editing(Vec<DraftItem>),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The editing session for one order's items.
///
/// `committed` is the last item list confirmed by the backend; the working
/// copy exists only while editing and is discarded (cancel) or replaced by
/// the backend's response (commit) as a whole.
#[derive(Debug, Clone)]
pub struct ItemSession {
    committed: Vec<OrderItem>,
    state: SessionState,
}

impl ItemSession {
    pub fn new(committed: Vec<OrderItem>) -> Self {
        Self {
            committed,
            state: SessionState::Viewing,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    /// The last item list confirmed by the backend.
    pub fn committed_items(&self) -> &[OrderItem] {
        &self.committed
    }

    /// The working copy, while editing.
    pub fn drafts(&self) -> Option<&[DraftItem]> {
        match &self.state {
            SessionState::Editing(drafts) => Some(drafts),
            SessionState::Viewing => None,
        }
    }

    /// Enter editing with a deep copy of the committed list. Re-entering
    /// resets the working copy to the committed baseline.
    pub fn begin(&mut self) {
        let drafts = self
            .committed
            .iter()
            .cloned()
            .map(DraftItem::Committed)
            .collect();
        self.state = SessionState::Editing(drafts);
        debug!(items = self.committed.len(), "item editing started");
    }

    /// Discard the working copy and return to the committed view. No
    /// network call is involved.
    pub fn cancel(&mut self) {
        self.state = SessionState::Viewing;
        debug!("item editing cancelled");
    }

    /// Set an item's quantity, clamped to a minimum of 1, and recompute
    /// that item's line total. Other items are untouched.
    pub fn change_quantity(&mut self, index: usize, quantity: u32) -> Result<(), EditError> {
        let drafts = self.drafts_mut()?;
        let draft = drafts.get_mut(index).ok_or(EditError::NoSuchItem(index))?;
        let item = draft.item_mut();
        let quantity = quantity.max(1);
        item.quantity = quantity;
        item.total = money::line_total(&item.price, quantity);
        Ok(())
    }

    /// Remove an item from the working copy. Removing the last item is
    /// allowed; an empty working copy can still be saved.
    pub fn remove_item(&mut self, index: usize) -> Result<(), EditError> {
        let drafts = self.drafts_mut()?;
        if index >= drafts.len() {
            return Err(EditError::NoSuchItem(index));
        }
        drafts.remove(index);
        Ok(())
    }

    /// Append an item resolved from the catalog snapshot.
    ///
    /// Price and line total come from the variant's snapshot price at
    /// add-time and are not re-fetched at save-time; display fields are
    /// copied from the snapshot. Quantity is clamped to a minimum of 1.
    pub fn add_item(
        &mut self,
        catalog: &CatalogSnapshot,
        product_id: &str,
        variant_id: &str,
        quantity: u32,
    ) -> Result<(), EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        let pick = catalog.pick(product_id, variant_id)?;
        let quantity = quantity.max(1);
        let item = OrderItem {
            product_id: pick.product.id.clone(),
            variant_id: pick.variant.id.clone(),
            quantity,
            price: pick.variant.price.clone(),
            total: money::line_total(&pick.variant.price, quantity),
            product_name: pick.product.name.clone(),
            variant_weight: pick.variant.weight.clone(),
            image: pick.product.image.clone(),
        };
        debug!(
            product_id = %item.product_id,
            variant_id = %item.variant_id,
            quantity,
            "item added to working copy"
        );
        let drafts = self.drafts_mut()?;
        drafts.push(DraftItem::Added(item));
        Ok(())
    }

    /// Display-only total of the items currently shown: the working copy
    /// while editing, otherwise the committed list. The authoritative order
    /// total is always the backend's.
    pub fn working_total(&self) -> String {
        match &self.state {
            SessionState::Editing(drafts) => {
                money::sum_totals(drafts.iter().map(|d| d.item().total.as_str()))
            }
            SessionState::Viewing => {
                money::sum_totals(self.committed.iter().map(|i| i.total.as_str()))
            }
        }
    }

    /// The reduced replace-all payload for the working copy: draft tags and
    /// display-only fields are stripped. An empty working copy yields an
    /// empty payload; whether a zero-item order is acceptable is the
    /// backend's call.
    pub fn save_payload(&self) -> Result<Vec<OrderItemPayload>, EditError> {
        match &self.state {
            SessionState::Editing(drafts) => Ok(drafts
                .iter()
                .map(|draft| {
                    let item = draft.item();
                    OrderItemPayload {
                        product_id: item.product_id.clone(),
                        variant_id: item.variant_id.clone(),
                        quantity: item.quantity,
                        price: item.price.clone(),
                    }
                })
                .collect()),
            SessionState::Viewing => Err(EditError::NotEditing),
        }
    }

    /// Adopt the backend's authoritative item list as the new committed
    /// baseline and end the session (successful save or reload).
    pub fn commit(&mut self, items: Vec<OrderItem>) {
        self.committed = items;
        self.state = SessionState::Viewing;
    }

    /// Adopt a new committed baseline without ending an active editing
    /// session (the order was replaced by a status or detail update while
    /// the operator keeps editing items).
    pub fn rebase(&mut self, items: Vec<OrderItem>) {
        self.committed = items;
    }

    fn drafts_mut(&mut self) -> Result<&mut Vec<DraftItem>, EditError> {
        match &mut self.state {
            SessionState::Editing(drafts) => Ok(drafts),
            SessionState::Viewing => Err(EditError::NotEditing),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductVariant};

    fn item(product: &str, quantity: u32, price: &str) -> OrderItem {
        OrderItem {
            product_id: product.to_string(),
            variant_id: format!("{product}-v1"),
            quantity,
            price: price.to_string(),
            total: money::line_total(price, quantity),
            product_name: format!("Product {product}"),
            variant_weight: "50 g".to_string(),
            image: String::new(),
        }
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::from_products(vec![Product {
            id: "b".to_string(),
            name: "Product b".to_string(),
            image: "b.jpg".to_string(),
            is_active: true,
            variants: vec![
                ProductVariant {
                    id: "b-v1".to_string(),
                    weight: "100 g".to_string(),
                    price: "50.00".to_string(),
                    is_active: true,
                    sort_order: 0,
                },
                ProductVariant {
                    id: "b-v2".to_string(),
                    weight: "200 g".to_string(),
                    price: "90.00".to_string(),
                    is_active: false,
                    sort_order: 1,
                },
            ],
        }])
    }

    #[test]
    fn mutations_require_editing() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        assert_eq!(
            session.change_quantity(0, 2),
            Err(EditError::NotEditing)
        );
        assert_eq!(session.remove_item(0), Err(EditError::NotEditing));
        assert_eq!(session.save_payload(), Err(EditError::NotEditing));
    }

    #[test]
    fn change_quantity_recomputes_line_total() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00"), item("b", 1, "50.00")]);
        session.begin();
        session.change_quantity(1, 3).unwrap();

        let drafts = session.drafts().unwrap();
        assert_eq!(drafts[1].item().quantity, 3);
        assert_eq!(drafts[1].item().total, "150.00");
        // the other item is untouched
        assert_eq!(drafts[0].item().total, "100.00");
    }

    #[test]
    fn quantity_below_one_is_clamped_not_rejected() {
        let mut session = ItemSession::new(vec![item("a", 2, "100.00")]);
        session.begin();
        session.change_quantity(0, 0).unwrap();

        let drafts = session.drafts().unwrap();
        assert_eq!(drafts[0].item().quantity, 1);
        assert_eq!(drafts[0].item().total, "100.00");
    }

    #[test]
    fn change_quantity_unknown_index_is_rejected() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        session.begin();
        assert_eq!(session.change_quantity(5, 2), Err(EditError::NoSuchItem(5)));
    }

    #[test]
    fn cancel_restores_the_exact_committed_list() {
        let before = vec![item("a", 1, "100.00"), item("b", 2, "50.00")];
        let mut session = ItemSession::new(before.clone());

        session.begin();
        session.change_quantity(0, 9).unwrap();
        session.remove_item(1).unwrap();
        session
            .add_item(&catalog(), "b", "b-v1", 4)
            .unwrap();
        session.cancel();

        assert!(!session.is_editing());
        assert_eq!(session.committed_items(), before.as_slice());
    }

    #[test]
    fn add_item_takes_price_and_display_fields_from_snapshot() {
        let mut session = ItemSession::new(vec![]);
        session.begin();
        session.add_item(&catalog(), "b", "b-v1", 2).unwrap();

        let drafts = session.drafts().unwrap();
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].is_new());
        let added = drafts[0].item();
        assert_eq!(added.price, "50.00");
        assert_eq!(added.total, "100.00");
        assert_eq!(added.product_name, "Product b");
        assert_eq!(added.variant_weight, "100 g");
        assert_eq!(added.image, "b.jpg");
    }

    #[test]
    fn add_item_quantity_defaults_up_to_one() {
        let mut session = ItemSession::new(vec![]);
        session.begin();
        session.add_item(&catalog(), "b", "b-v1", 0).unwrap();
        assert_eq!(session.drafts().unwrap()[0].item().quantity, 1);
    }

    #[test]
    fn add_item_rejects_stale_or_unknown_picks() {
        let mut session = ItemSession::new(vec![]);
        session.begin();
        assert_eq!(
            session.add_item(&catalog(), "b", "b-v2", 1),
            Err(EditError::Pick(PickError::InactiveVariant))
        );
        assert_eq!(
            session.add_item(&catalog(), "missing", "b-v1", 1),
            Err(EditError::Pick(PickError::UnknownProduct))
        );
        assert!(session.drafts().unwrap().is_empty());
    }

    #[test]
    fn working_total_tracks_every_mutation_and_is_idempotent() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        session.begin();
        assert_eq!(session.working_total(), "100.00");

        session.add_item(&catalog(), "b", "b-v1", 2).unwrap();
        assert_eq!(session.working_total(), "200.00");

        session.change_quantity(0, 2).unwrap();
        assert_eq!(session.working_total(), "300.00");

        session.remove_item(0).unwrap();
        assert_eq!(session.working_total(), "100.00");
        // no mutation in between: same value again
        assert_eq!(session.working_total(), "100.00");
    }

    #[test]
    fn empty_working_copy_still_yields_a_payload() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        session.begin();
        session.remove_item(0).unwrap();
        assert_eq!(session.save_payload().unwrap(), vec![]);
    }

    #[test]
    fn save_payload_strips_display_fields_and_tags() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        session.begin();
        session.add_item(&catalog(), "b", "b-v1", 2).unwrap();

        let payload = session.save_payload().unwrap();
        assert_eq!(
            payload,
            vec![
                OrderItemPayload {
                    product_id: "a".to_string(),
                    variant_id: "a-v1".to_string(),
                    quantity: 1,
                    price: "100.00".to_string(),
                },
                OrderItemPayload {
                    product_id: "b".to_string(),
                    variant_id: "b-v1".to_string(),
                    quantity: 2,
                    price: "50.00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn commit_replaces_baseline_and_ends_editing() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        session.begin();
        session.change_quantity(0, 5).unwrap();

        let from_server = vec![item("a", 5, "100.00"), item("b", 2, "50.00")];
        session.commit(from_server.clone());

        assert!(!session.is_editing());
        assert_eq!(session.committed_items(), from_server.as_slice());
    }

    #[test]
    fn rebase_keeps_an_active_working_copy() {
        let mut session = ItemSession::new(vec![item("a", 1, "100.00")]);
        session.begin();
        session.change_quantity(0, 4).unwrap();

        session.rebase(vec![item("a", 1, "100.00"), item("b", 1, "50.00")]);

        assert!(session.is_editing());
        // the working copy still carries the local edit
        assert_eq!(session.drafts().unwrap()[0].item().quantity, 4);
        // but the committed baseline moved
        assert_eq!(session.committed_items().len(), 2);
    }
}
