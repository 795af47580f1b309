//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! - **Questions**: the [`QuestionRepository`], an explicitly constructed
//!   handle over the in-memory [`Store`] with optional Postgres write-through.
//! - **Database pool**: kept here as well for the readiness probe.
//! - **Configuration**: [`AppConfig`], read once from the environment.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use questions_core::QuestionId;
use sqlx::PgPool;
use thiserror::Error;

use crate::repository::{QuestionRepository, RepositoryError};

// -- Generic In-Memory Store --------------------------------------------------

/// Ordered in-memory map from [`QuestionId`] to record, shared by clone.
///
/// Uses a `parking_lot` lock; no guard is ever held across an `.await`.
/// Listing walks keys in ascending id order.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<BTreeMap<QuestionId, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns the record previously stored under `id`, if any.
    pub fn insert(&self, id: QuestionId, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    pub fn get(&self, id: &QuestionId) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List the records matching `predicate`, in ascending id order.
    pub fn list_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.data
            .read()
            .values()
            .filter(|value| predicate(value))
            .cloned()
            .collect()
    }

    pub fn remove(&self, id: &QuestionId) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Highest key currently stored.
    pub fn max_key(&self) -> Option<QuestionId> {
        self.data.read().keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Configuration ------------------------------------------------------------

/// Deployment environment, from `APP_ENV`.
///
/// Error envelopes carry `error` and `code` everywhere except production;
/// internal error detail is only shown in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    /// Whether error envelopes include `error` and `code`.
    pub fn exposes_error_details(&self) -> bool {
        !matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for AppEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidAppEnv(other.to_string())),
        }
    }
}

/// Errors reading [`AppConfig`] from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("APP_ENV must be one of development, test, production; got '{0}'")]
    InvalidAppEnv(String),
}

/// Application configuration.
///
/// Custom `Debug` redacts the `auth_token` to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
    pub env: AppEnv,
}

impl AppConfig {
    /// Read `PORT`, `AUTH_TOKEN` and `APP_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };
        let auth_token = lookup("AUTH_TOKEN").filter(|t| !t.is_empty());
        let env = match lookup("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => AppEnv::default(),
        };
        Ok(Self {
            port,
            auth_token,
            env,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("env", &self.env)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            env: AppEnv::default(),
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in the repository and the pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub questions: QuestionRepository,

    /// PostgreSQL connection pool. When `None`, the API operates in
    /// in-memory-only mode.
    pub db_pool: Option<PgPool>,

    pub config: AppConfig,
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            questions: QuestionRepository::new(db_pool.clone()),
            db_pool,
            config,
        }
    }

    /// Hydrate the in-memory store from the database.
    ///
    /// Called once on startup. A no-op without a database pool.
    pub async fn hydrate_from_db(&self) -> Result<(), RepositoryError> {
        let loaded = self.questions.hydrate().await?;
        if self.db_pool.is_some() {
            tracing::info!(questions = loaded, "Hydrated in-memory store from database");
        }
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
