use std::collections::HashMap;

use thiserror::Error;

/// Well-known key the session token is persisted under.
pub const SESSION_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("failed to persist session token: {0}")]
    Storage(String),
}

/// Key-value slot backing a [`Session`]. Browser local storage in the web
/// client, a JSON file in the CLI.
pub trait TokenStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl TokenStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.values.remove(key);
        Ok(())
    }
}

/// The session context handed to every view that reads or writes the token.
///
/// The in-memory token and the backing store are only changed together:
/// `update` writes the store first and keeps the previous token if the write
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session<S> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    pub fn restore(store: S) -> Self {
        let token = store.load(SESSION_STORAGE_KEY);
        Self { store, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn update(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        self.store.save(SESSION_STORAGE_KEY, &token)?;
        self.token = Some(token);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(SESSION_STORAGE_KEY)?;
        self.token = None;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
