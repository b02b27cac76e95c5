mod catalog;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog::Catalog;
use routes::{auth, codes, health};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

pub struct AppState {
    pub catalog: Catalog,
    pub config: AppConfig,
}

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub allowed_origins: Vec<String>,
    pub codes_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let dev_mode = std::env::var("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if dev_mode => "dev-secret-do-not-use-in-production".to_string(),
            Err(_) => anyhow::bail!("JWT_SECRET must be set in production"),
        };

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            jwt_secret,
            token_ttl_hours: parse_token_ttl(std::env::var("TOKEN_TTL_HOURS").ok().as_deref())?,
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            codes_file: std::env::var("CODES_FILE").ok().map(PathBuf::from),
        })
    }
}

fn parse_token_ttl(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TOKEN_TTL_HOURS);
    };
    let hours: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("TOKEN_TTL_HOURS is not a number: {raw}"))?;
    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        anyhow::bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {hours}");
    }
    Ok(hours)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {o}");
                None
            }
        })
        .collect();

    Router::new()
        .route("/", get(health::info))
        .route("/health", get(health::health_check))
        .route(shared::CODES_PATH, get(codes::list))
        .route(shared::REDEEM_PATH, post(codes::redeem))
        .route(shared::LOGIN_PATH, post(auth::login))
        .route(shared::SESSION_PATH, get(auth::session))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let catalog = match &config.codes_file {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::default(),
    };
    tracing::info!("Loaded {} codes", catalog.code_count());

    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_router(AppState { catalog, config });

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            ["http://a.test", "http://b.test"]
        );
        assert_eq!(parse_origins(DEFAULT_ALLOWED_ORIGINS).len(), 2);
    }

    #[test]
    fn token_ttl_defaults_and_bounds() {
        assert_eq!(parse_token_ttl(None).unwrap(), DEFAULT_TOKEN_TTL_HOURS);
        assert_eq!(parse_token_ttl(Some(" 48 ")).unwrap(), 48);
        assert_eq!(
            parse_token_ttl(Some("8760")).unwrap(),
            MAX_TOKEN_TTL_HOURS
        );
        assert!(parse_token_ttl(Some("0")).is_err());
        assert!(parse_token_ttl(Some("-1")).is_err());
        assert!(parse_token_ttl(Some("9223372036854775807")).is_err());
        assert!(parse_token_ttl(Some("a day")).is_err());
    }

    #[tokio::test]
    async fn preflight_allows_configured_origin_only() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let preflight = |origin: &str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri(shared::CODES_PATH)
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = test_support::test_app()
            .oneshot(preflight("http://localhost:5173"))
            .await
            .unwrap();
        assert_eq!(
            allowed
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );

        let denied = test_support::test_app()
            .oneshot(preflight("http://evil.test"))
            .await
            .unwrap();
        assert!(denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
