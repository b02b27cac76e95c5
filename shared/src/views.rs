//! Rendering and completion rules shared by the web views and the CLI.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::{
    ClientError, CodeEntry, LoginResponse, RedeemResponse, RequestState, Session, TokenStore,
};

pub const LOADING_CODES: &str = "Loading codes...";
pub const REDEEM_FAILED: &str = "Failed to redeem code";
pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGIN_ERRORED: &str = "Login error occurred";

/// How long the success message stays on screen before returning to the catalog.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogView<'a> {
    Loading,
    Grid(&'a [CodeEntry]),
}

/// Maps the catalog request onto what the list view renders.
///
/// A failed fetch renders as an empty grid with no banner. The error is only
/// visible to whoever reads the console log.
pub fn catalog_view(state: &RequestState<Vec<CodeEntry>>) -> CatalogView<'_> {
    match state {
        RequestState::Pending => CatalogView::Loading,
        RequestState::Success(entries) => CatalogView::Grid(entries),
        RequestState::Failure(_) => CatalogView::Grid(&[]),
    }
}

// ============================================================================
// Redeem
// ============================================================================

/// Text for the blocking notification raised after a redeem attempt.
pub fn redeem_notice(result: Result<RedeemResponse, ClientError>) -> String {
    match result {
        Ok(resp) => resp.message,
        Err(e) => {
            log::error!("Error redeeming code: {}", e);
            REDEEM_FAILED.to_string()
        }
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token persisted; the caller may navigate away.
    Authenticated,
    /// The server answered and said no.
    Rejected,
    /// Transport, parse or storage failure.
    Errored,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LoginOutcome::Authenticated => LOGIN_SUCCEEDED,
            LoginOutcome::Rejected => LOGIN_FAILED,
            LoginOutcome::Errored => LOGIN_ERRORED,
        }
    }

    pub fn redirects(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated)
    }
}

/// Applies a login response to the session.
///
/// Returns [`LoginOutcome::Authenticated`] only after the token write has
/// completed, so navigation ordered on the outcome always follows the write.
pub fn complete_login<S: TokenStore>(
    result: Result<LoginResponse, ClientError>,
    session: &mut Session<S>,
) -> LoginOutcome {
    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("Error logging in: {}", e);
            return LoginOutcome::Errored;
        }
    };

    if !resp.success {
        return LoginOutcome::Rejected;
    }

    let Some(token) = resp.token else {
        log::error!("Login succeeded without a token");
        return LoginOutcome::Errored;
    };

    match session.update(token) {
        Ok(()) => LoginOutcome::Authenticated,
        Err(e) => {
            log::error!("{}", e);
            LoginOutcome::Errored
        }
    }
}

/// Shared flag a view flips on teardown to drop a pending redirect.
#[derive(Debug, Clone, Default)]
pub struct RedirectCancel(Rc<Cell<bool>>);

impl RedirectCancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Waits out `delay`, then runs `navigate` unless the redirect was cancelled
/// in the meantime. Returns whether navigation happened.
pub async fn redirect_after<D, N>(delay: D, cancel: RedirectCancel, navigate: N) -> bool
where
    D: Future<Output = ()>,
    N: FnOnce(),
{
    delay.await;
    if cancel.is_cancelled() {
        return false;
    }
    navigate();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, SESSION_STORAGE_KEY};

    fn entry(game: &str, code: &str, expires: Option<&str>) -> CodeEntry {
        CodeEntry {
            game: game.to_string(),
            code: code.to_string(),
            reward: "rewards".to_string(),
            expires: expires.map(str::to_string),
        }
    }

    #[test]
    fn pending_catalog_shows_loading() {
        assert_eq!(catalog_view(&RequestState::Pending), CatalogView::Loading);
    }

    #[test]
    fn catalog_grid_keeps_response_order() {
        let entries = vec![
            entry("Genshin Impact", "GENSHINGIFT", Some("2025-12-31")),
            entry("Honkai: Star Rail", "STARRAILGIFT", Some("2025-12-31")),
            entry("Genshin Impact", "IMPACTCODE123", None),
        ];
        let state = RequestState::Success(entries);

        let CatalogView::Grid(cards) = catalog_view(&state) else {
            panic!("expected grid");
        };
        assert_eq!(cards.len(), 3);
        let codes: Vec<_> = cards.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["GENSHINGIFT", "STARRAILGIFT", "IMPACTCODE123"]);

        let lines: Vec<_> = cards.iter().map(CodeEntry::expiry_line).collect();
        assert_eq!(
            lines,
            [
                Some("Expires: 2025-12-31".to_string()),
                Some("Expires: 2025-12-31".to_string()),
                None
            ]
        );
    }

    #[test]
    fn failed_catalog_renders_empty_grid() {
        let state = RequestState::Failure(ClientError::Transport("offline".to_string()));
        assert_eq!(catalog_view(&state), CatalogView::Grid(&[]));
    }

    #[test]
    fn redeem_notice_is_server_message() {
        let notice = redeem_notice(Ok(RedeemResponse {
            success: false,
            message: "X".to_string(),
        }));
        assert_eq!(notice, "X");
    }

    #[test]
    fn redeem_transport_failure_is_generic() {
        let notice = redeem_notice(Err(ClientError::Decode("not json".to_string())));
        assert_eq!(notice, REDEEM_FAILED);
    }

    #[test]
    fn successful_login_stores_token_then_redirects() {
        let mut session = Session::restore(MemoryStore::new());
        let outcome = complete_login(
            Ok(LoginResponse {
                success: true,
                token: Some("T".to_string()),
                message: "Login successful".to_string(),
            }),
            &mut session,
        );

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert!(outcome.redirects());
        assert_eq!(outcome.message(), LOGIN_SUCCEEDED);
        assert_eq!(session.store().get(SESSION_STORAGE_KEY), Some("T"));
    }

    #[test]
    fn rejected_login_leaves_storage_alone() {
        let mut store = MemoryStore::new();
        store.save(SESSION_STORAGE_KEY, "old").unwrap();
        let mut session = Session::restore(store.clone());

        let outcome = complete_login(
            Ok(LoginResponse {
                success: false,
                token: None,
                message: "Invalid credentials".to_string(),
            }),
            &mut session,
        );

        assert_eq!(outcome, LoginOutcome::Rejected);
        assert!(!outcome.redirects());
        assert_eq!(outcome.message(), LOGIN_FAILED);
        assert_eq!(session.store(), &store);
    }

    #[test]
    fn transport_error_is_reported_without_redirect() {
        let mut session = Session::restore(MemoryStore::new());
        let outcome = complete_login(
            Err(ClientError::Transport("connection refused".to_string())),
            &mut session,
        );
        assert_eq!(outcome, LoginOutcome::Errored);
        assert_eq!(outcome.message(), LOGIN_ERRORED);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn success_without_token_is_an_error() {
        let mut session = Session::restore(MemoryStore::new());
        let outcome = complete_login(
            Ok(LoginResponse {
                success: true,
                token: None,
                message: String::new(),
            }),
            &mut session,
        );
        assert_eq!(outcome, LoginOutcome::Errored);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn missing_success_flag_is_a_rejection() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"detail":"Invalid credentials"}"#).unwrap();
        let mut session = Session::restore(MemoryStore::new());

        let outcome = complete_login(Ok(body), &mut session);
        assert_eq!(outcome, LoginOutcome::Rejected);
        assert_eq!(outcome.message(), LOGIN_FAILED);
        assert!(!session.is_authenticated());
    }

    fn navigation_flag() -> (Rc<Cell<bool>>, impl FnOnce()) {
        let navigated = Rc::new(Cell::new(false));
        let flag = navigated.clone();
        (navigated, move || flag.set(true))
    }

    #[tokio::test(start_paused = true)]
    async fn redirect_fires_only_after_delay() {
        let (navigated, navigate) = navigation_flag();
        let start = tokio::time::Instant::now();
        let redirect = redirect_after(
            tokio::time::sleep(REDIRECT_DELAY),
            RedirectCancel::new(),
            navigate,
        );
        tokio::pin!(redirect);

        let early = tokio::time::timeout(
            REDIRECT_DELAY - Duration::from_millis(1),
            redirect.as_mut(),
        )
        .await;
        assert!(early.is_err());
        assert!(!navigated.get());

        assert!(redirect.await);
        assert!(navigated.get());
        assert!(start.elapsed() >= REDIRECT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_redirect_never_navigates() {
        let (navigated, navigate) = navigation_flag();
        let cancel = RedirectCancel::new();
        let redirect = redirect_after(
            tokio::time::sleep(REDIRECT_DELAY),
            cancel.clone(),
            navigate,
        );
        tokio::pin!(redirect);

        let early = tokio::time::timeout(Duration::from_millis(10), redirect.as_mut()).await;
        assert!(early.is_err());
        cancel.cancel();

        assert!(!redirect.await);
        assert!(!navigated.get());
    }
}
