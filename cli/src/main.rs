use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    catalog_view, complete_login, redeem_notice, ApiError, CatalogView, ClientError, CodeEntry,
    LoginRequest, LoginResponse, RedeemRequest, RedeemResponse, RequestState, Session,
    SessionError, SessionInfo, TokenStore, CODES_PATH, LOGIN_PATH, REDEEM_PATH, SESSION_PATH,
};

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser)]
#[command(name = "codes-hub-cli")]
#[command(about = "Terminal client for the Hoyoverse Codes Hub API")]
struct Cli {
    /// Base URL of the API server
    #[arg(long, env = "CODES_HUB_API", default_value = "http://localhost:8000")]
    api_url: String,
    /// File holding the session token (defaults to ~/.codes-hub/session.json)
    #[arg(long, env = "CODES_HUB_SESSION")]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available codes
    List {
        /// Only show codes for this game
        #[arg(long)]
        game: Option<String>,
    },
    /// Redeem a code
    Redeem {
        #[arg(long)]
        code: String,
        #[arg(long)]
        game: String,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show who the stored session token belongs to
    Whoami,
}

// ============================================================================
// Session file
// ============================================================================

/// JSON object on disk, one string value per key.
struct FileStore {
    path: PathBuf,
}

impl FileStore {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn default_path() -> PathBuf {
        let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
        home.join(".codes-hub").join("session.json")
    }

    /// A missing file is an empty session. An unreadable or corrupt one is
    /// an error, so writes never clobber it.
    fn read_all(&self) -> Result<HashMap<String, String>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(storage_error(format!(
                    "cannot read {}: {}",
                    display(&self.path),
                    e
                )))
            }
        };
        serde_json::from_str(&raw).map_err(|e| {
            storage_error(format!("corrupt session file {}: {}", display(&self.path), e))
        })
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(storage_error)?;
        }
        let raw = serde_json::to_string_pretty(values).map_err(storage_error)?;
        write_private(&self.path, &raw).map_err(storage_error)
    }
}

/// Writes `contents` readable by the owner only; the file holds a bearer token.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}

fn storage_error(e: impl std::fmt::Display) -> SessionError {
    SessionError::Storage(e.to_string())
}

impl TokenStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                eprintln!("warning: {}", e);
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&values)
    }
}

// ============================================================================
// API client
// ============================================================================

struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        resp.json::<T>()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn codes(&self, game: Option<&str>) -> Result<Vec<CodeEntry>, ClientError> {
        let mut request = self.http.get(self.url(CODES_PATH));
        if let Some(game) = game {
            request = request.query(&[("game", game)]);
        }
        let resp = request.send().map_err(transport)?;
        Self::decode(resp)
    }

    fn redeem(&self, body: &RedeemRequest) -> Result<RedeemResponse, ClientError> {
        let resp = self
            .http
            .post(self.url(REDEEM_PATH))
            .json(body)
            .send()
            .map_err(transport)?;
        Self::decode(resp)
    }

    fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let resp = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(body)
            .send()
            .map_err(transport)?;
        Self::decode(resp)
    }

    fn session(&self, token: &str) -> anyhow::Result<SessionInfo> {
        let resp = self
            .http
            .get(self.url(SESSION_PATH))
            .bearer_auth(token)
            .send()
            .map_err(transport)?;
        if resp.status().is_success() {
            return Ok(Self::decode(resp)?);
        }
        let status = resp.status();
        match resp.json::<ApiError>() {
            Ok(err) => anyhow::bail!("{}", err.error.message),
            Err(_) => anyhow::bail!("session check failed with status {}", status),
        }
    }
}

fn transport(e: reqwest::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

// ============================================================================
// Output
// ============================================================================

fn format_card(entry: &CodeEntry) -> String {
    let mut lines = vec![
        entry.game.clone(),
        format!("  {}", entry.code),
        format!("  {}", entry.reward),
    ];
    if let Some(expiry) = entry.expiry_line() {
        lines.push(format!("  {}", expiry));
    }
    lines.join("\n")
}

fn format_catalog(state: &RequestState<Vec<CodeEntry>>) -> String {
    match catalog_view(state) {
        CatalogView::Loading => shared::LOADING_CODES.to_string(),
        CatalogView::Grid(entries) => entries
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn report(result: &Result<impl Sized, ClientError>) {
    if let Err(e) = result {
        eprintln!("{}", e);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let api = ApiClient::new(&cli.api_url);
    let session_path = cli.session_file.unwrap_or_else(FileStore::default_path);
    let mut session = Session::restore(FileStore::new(&session_path));

    match cli.command {
        Commands::List { game } => {
            let result = api.codes(game.as_deref());
            report(&result);
            let output = format_catalog(&result.into());
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Redeem { code, game } => {
            let result = api.redeem(&RedeemRequest { code, game });
            report(&result);
            println!("{}", redeem_notice(result));
        }
        Commands::Login { username, password } => {
            let form = LoginRequest { username, password };
            if !form.is_submittable() {
                anyhow::bail!("username and password are required");
            }
            let result = api.login(&form);
            report(&result);
            let outcome = complete_login(result, &mut session);
            if !outcome.redirects() {
                anyhow::bail!("{}", outcome.message());
            }
            println!("{}", outcome.message());
        }
        Commands::Logout => {
            session
                .clear()
                .with_context(|| format!("failed to update {}", display(&session_path)))?;
            println!("Logged out");
        }
        Commands::Whoami => {
            let token = session
                .token()
                .context("Not logged in. Run `codes-hub-cli login` first.")?;
            let info = api.session(token)?;
            println!("{}", info.username);
        }
    }

    Ok(())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    run(Cli::parse())
}
