use crate::domain::errors::StorageError;
use crate::domain::logger::Logger;

use super::checkout::CheckoutReport;
use super::model::CartLine;
use crate::domain::shared::value_objects::AccountId;

/// Key under which the anonymous cart blob is kept.
pub const LOCAL_CART_KEY: &str = "cart";

/// Key of the report of a checkout that stopped part way.
pub const PENDING_CHECKOUT_KEY: &str = "checkout.pending";

/// Key/value storage scoped to one visitor (browser local storage or its
/// equivalent).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads the anonymous cart.
///
/// A missing, unreadable or malformed blob yields an empty cart. One invalid
/// line invalidates the whole blob.
pub fn load_local_cart(store: &dyn SessionStore, logger: &dyn Logger) -> Vec<CartLine> {
    let raw = match store.get(LOCAL_CART_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            logger.warn(&format!("Local cart could not be read: {}", e));
            return Vec::new();
        }
    };

    let lines: Vec<CartLine> = match serde_json::from_str(&raw) {
        Ok(lines) => lines,
        Err(e) => {
            logger.warn(&format!("Local cart is malformed, starting empty: {}", e));
            return Vec::new();
        }
    };

    if let Some(err) = lines.iter().find_map(|line| line.validate().err()) {
        logger.warn(&format!(
            "Local cart holds an invalid line, starting empty: {}",
            err
        ));
        return Vec::new();
    }

    lines
}

pub fn save_local_cart(store: &dyn SessionStore, lines: &[CartLine]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(lines).map_err(|e| StorageError::Io(e.to_string()))?;
    store.set(LOCAL_CART_KEY, &raw)
}

pub fn remove_local_cart(store: &dyn SessionStore) -> Result<(), StorageError> {
    store.remove(LOCAL_CART_KEY)
}

/// Reads the unfinished checkout of `account_id`.
///
/// A report left by another account, or one that no longer parses, is
/// ignored.
pub fn load_pending_checkout(
    store: &dyn SessionStore,
    account_id: &AccountId,
    logger: &dyn Logger,
) -> Option<CheckoutReport> {
    let raw = match store.get(PENDING_CHECKOUT_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            logger.warn(&format!("Pending checkout could not be read: {}", e));
            return None;
        }
    };

    match serde_json::from_str::<CheckoutReport>(&raw) {
        Ok(report) if &report.account_id == account_id => Some(report),
        Ok(_) => None,
        Err(e) => {
            logger.warn(&format!("Pending checkout is malformed, ignoring it: {}", e));
            None
        }
    }
}

pub fn save_pending_checkout(
    store: &dyn SessionStore,
    report: &CheckoutReport,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(report).map_err(|e| StorageError::Io(e.to_string()))?;
    store.set(PENDING_CHECKOUT_KEY, &raw)
}

pub fn remove_pending_checkout(store: &dyn SessionStore) -> Result<(), StorageError> {
    store.remove(PENDING_CHECKOUT_KEY)
}
