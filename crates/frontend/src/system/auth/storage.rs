use std::cell::RefCell;

use web_sys::window;

/// localStorage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Durable side channel for the session token.
///
/// Writes are synchronous so the persisted value never lags the in-memory one.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser implementation backed by `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        get_local_storage()?
            .get_item(TOKEN_KEY)
            .ok()?
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        match get_local_storage() {
            Some(storage) => {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::warn!("localStorage rejected the session token");
                }
            }
            None => log::warn!("localStorage is not available, token kept in memory only"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// In-memory store, used by tests and as a fallback outside the browser
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.current()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);
        store.save("abc");
        assert_eq!(store.load(), Some("abc".to_string()));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
