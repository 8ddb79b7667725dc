//! Catalog lookup for the "add item" picker.
//!
//! Read-only snapshot of active products, fetched on demand when the picker
//! opens and cached for the lifetime of the open order screen. Variant
//! activity is judged against this snapshot, so a variant retired after the
//! fetch is rejected locally without another round trip.

use reqwest::Method;
use thiserror::Error;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{Product, ProductList, ProductVariant};

const PRODUCTS_PATH: &str = "/v1/admin/products";

/// Page size requested for the picker's single-page product fetch.
const PICKER_PAGE_LIMIT: u32 = 100;

/// Why a product/variant pick could not be resolved against the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("Selected product is not in the catalog")]
    UnknownProduct,
    #[error("Selected variant is not in the catalog")]
    UnknownVariant,
    #[error("Selected variant is no longer active")]
    InactiveVariant,
}

/// A resolved product/variant pair borrowed from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantPick<'a> {
    pub product: &'a Product,
    pub variant: &'a ProductVariant,
}

/// Read-only product snapshot backing the "add item" picker.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    /// Fetch the active-product snapshot with the picker's default page size.
    pub async fn fetch(client: &ApiClient) -> Result<Self, ApiError> {
        Self::fetch_with_limit(client, PICKER_PAGE_LIMIT).await
    }

    /// Fetch the active-product snapshot with an explicit page size.
    pub async fn fetch_with_limit(client: &ApiClient, limit: u32) -> Result<Self, ApiError> {
        let list: ProductList = client
            .request_with_query(
                Method::GET,
                PRODUCTS_PATH,
                &[
                    ("is_active", "true".to_string()),
                    ("limit", limit.to_string()),
                ],
                None,
            )
            .await?;
        debug!(count = list.items.len(), "catalog snapshot fetched");
        Ok(Self::from_products(list.items))
    }

    /// Build a snapshot from already-fetched products.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolve a product/variant pick.
    ///
    /// A pick that no longer resolves, or resolves to an inactive variant,
    /// fails here on the client; no request is issued.
    pub fn pick(&self, product_id: &str, variant_id: &str) -> Result<VariantPick<'_>, PickError> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(PickError::UnknownProduct)?;
        let variant = product
            .variants
            .iter()
            .find(|v| v.id == variant_id)
            .ok_or(PickError::UnknownVariant)?;
        if !variant.is_active {
            return Err(PickError::InactiveVariant);
        }
        Ok(VariantPick { product, variant })
    }
}
