use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

/// Persisted string key-value store (browser local storage or an equivalent).
///
/// Implementations swallow their own I/O failures after logging them: a
/// store that cannot be written behaves like one that forgot the value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Handle on the persisted session shared by the route guard and the API
/// client. Cloning shares the underlying store.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// The token, if one is stored and non-empty.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY).filter(|u| !u.is_empty())
    }

    pub fn sign_in(&self, token: &str, username: &str) {
        debug!(username, "session established");
        self.store.set(TOKEN_KEY, token);
        self.store.set(USERNAME_KEY, username);
    }

    /// Forget the token and the cached username.
    pub fn clear(&self) {
        debug!("session cleared");
        self.store.delete(TOKEN_KEY);
        self.store.delete(USERNAME_KEY);
    }
}
