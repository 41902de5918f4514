// Built-in catalog and the listing -> details storage handoff
use crate::model::Product;
use crate::util::clog;
use thiserror::Error;

pub const SELECTED_KEY: &str = "selectedShirt";

const BUILTIN_CATALOG: &str = include_str!("../assets/shirts.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("browser storage unavailable: {0}")]
    Storage(String),
    #[error("nothing stored under {0}")]
    Missing(&'static str),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Parses the catalog array. Entries that are not product objects are
    /// skipped; only a file that is not a JSON array is an error.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
        let mut products = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let mut p: Product = match serde_json::from_value(entry) {
                Ok(p) => p,
                Err(e) => {
                    clog(&format!("skipping catalog entry {}: {}", i, e));
                    continue;
                }
            };
            if p.id.is_empty() {
                p.id = format!("shirt-{}", i);
            }
            products.push(p);
        }
        Ok(Self { products })
    }

    /// The catalog compiled into the app. A broken file renders an empty listing.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
            clog(&format!("catalog unavailable: {}", e));
            Self::default()
        })
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

pub fn decode_selected(raw: Option<String>) -> Result<Product, CatalogError> {
    let raw = raw.ok_or(CatalogError::Missing(SELECTED_KEY))?;
    Ok(serde_json::from_str(&raw)?)
}

fn local_storage() -> Result<web_sys::Storage, CatalogError> {
    let win = web_sys::window().ok_or_else(|| CatalogError::Storage("no window".into()))?;
    win.local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| CatalogError::Storage("localStorage disabled".into()))
}

/// Hand a product to the details page.
pub fn store_selected(product: &Product) -> Result<(), CatalogError> {
    let raw = serde_json::to_string(product)?;
    local_storage()?
        .set_item(SELECTED_KEY, &raw)
        .map_err(|_| CatalogError::Storage("write rejected".into()))
}

pub fn load_selected() -> Result<Product, CatalogError> {
    let raw = local_storage()?.get_item(SELECTED_KEY).ok().flatten();
    decode_selected(raw)
}
