use gloo_storage::{LocalStorage, Storage};
use shared::{Session, SessionError, TokenStore};
use yew::UseStateHandle;

/// Session handle provided by the app shell to every view.
pub type SessionContext = UseStateHandle<Session<BrowserStore>>;

/// Browser local storage. Values are written as raw strings so the token
/// stays readable under its key by anything else on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStore;

impl TokenStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }
}
