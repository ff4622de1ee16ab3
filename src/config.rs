use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::BoardError;
use crate::model::project::TITLE;
use crate::providers::github::{DEFAULT_ENDPOINT, PROJECTS_NEXT_FEATURE};

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub github: Option<GitHubConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GitHubConfig {
    pub token_file: Option<PathBuf>,
    pub username: Option<String>,
    pub project_number: Option<u32>,
    pub endpoint: Option<String>,
    pub features: Option<String>,
    /// Field whose `createdAt` stands in for the item's creation time.
    pub created_field: Option<String>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetOverrides {
    pub username: Option<String>,
    pub project_number: Option<u32>,
    pub token_file: Option<PathBuf>,
}

/// Everything needed to fetch one board.
#[derive(Debug, Clone)]
pub struct BoardTarget {
    pub token_file: PathBuf,
    pub username: String,
    pub project_number: u32,
    pub endpoint: String,
    pub features: String,
    pub created_field: String,
}

impl BoardTarget {
    /// github.com with the stock feature header, creation time from `Title`.
    pub fn with_defaults(token_file: PathBuf, username: String, project_number: u32) -> Self {
        Self {
            token_file,
            username,
            project_number,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            features: PROJECTS_NEXT_FEATURE.to_string(),
            created_field: TITLE.to_string(),
        }
    }

    pub fn resolve(config: &AppConfig, overrides: TargetOverrides) -> Result<Self> {
        let defaults = GitHubConfig::default();
        let gh = config.github.as_ref().unwrap_or(&defaults);

        let token_file = overrides
            .token_file
            .or_else(|| gh.token_file.clone())
            .context("No token file given. Pass --token-file or set github.token_file in ~/.ghboard/config.toml")?;
        let username = overrides
            .username
            .or_else(|| gh.username.clone())
            .context("No user given. Pass --user or set github.username in ~/.ghboard/config.toml")?;
        let project_number = overrides
            .project_number
            .or(gh.project_number)
            .context("No project number given. Pass --project or set github.project_number in ~/.ghboard/config.toml")?;

        Ok(Self {
            token_file,
            username,
            project_number,
            endpoint: gh
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            features: gh
                .features
                .clone()
                .unwrap_or_else(|| PROJECTS_NEXT_FEATURE.to_string()),
            created_field: gh.created_field.clone().unwrap_or_else(|| TITLE.to_string()),
        })
    }
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ghboard")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).with_context(|| "Failed to parse config.toml")
}

/// Reads a token file holding exactly one line.
pub fn read_token(path: &Path) -> std::result::Result<String, BoardError> {
    let invalid = |reason: String| BoardError::Credentials {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(invalid("file is empty".into()));
    }
    if token.lines().count() > 1 {
        return Err(invalid("expected a single line".into()));
    }
    Ok(token.to_string())
}
