use std::path::Path;

use thiserror::Error;

use crate::models::GameCode;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The set of known codes. Read-only once the server is up; redemption
/// never changes it.
#[derive(Debug, Clone)]
pub struct Catalog {
    codes: Vec<GameCode>,
}

impl Catalog {
    pub fn new(codes: Vec<GameCode>) -> Self {
        Self { codes }
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: display.clone(),
            source,
        })?;
        let codes: Vec<GameCode> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: display,
                source,
            })?;
        Ok(Self::new(codes))
    }

    /// Active codes in catalog order, optionally restricted to one game
    /// (matched case-insensitively on the full name). A blank game means
    /// no filter.
    pub fn active(&self, game: Option<&str>) -> Vec<&GameCode> {
        let game = game.filter(|g| !g.is_empty()).map(str::to_lowercase);
        self.codes
            .iter()
            .filter(|c| c.active)
            .filter(|c| {
                game.as_ref()
                    .map(|g| c.game.to_lowercase() == *g)
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.code == code)
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(GameCode::defaults())
    }
}
