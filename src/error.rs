//! Error types for envault operations.
//!
//! Each subsystem owns a small error enum; the top-level [`Error`] composes
//! them with `#[from]` so `?` works across module seams. Every fatal kind
//! bubbles unhandled to the single boundary in `main.rs`, which prints the
//! message (plus a suggestion where one exists) and exits 1.

use thiserror::Error;

/// Errors reading or validating a local `.env` file.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("env file not found: {0}")]
    NotFound(String),

    #[error("env file contains no variables: {0}")]
    Empty(String),
}

/// Errors producing or consuming a `.tpl` reference template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template file not found: {0}")]
    NotFound(String),

    /// The synchronizer returned an item that is missing a field id for a
    /// key it was asked to write. This is an internal-consistency defect,
    /// not a user error.
    #[error("no field id for key '{0}' in the synced item (this is a bug, please report it)")]
    MissingFieldId(String),
}

/// Errors from the secret-storage provider CLI.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider CLI not found: {0}")]
    CliMissing(String),

    #[error("provider sign-in failed")]
    AuthFailed,

    #[error("failed to create vault '{name}': {detail}")]
    VaultCreateFailed { name: String, detail: String },

    #[error("failed to create item '{title}': {detail}")]
    ItemCreateFailed { title: String, detail: String },

    #[error("failed to update item '{title}': {detail}")]
    ItemUpdateFailed { title: String, detail: String },

    #[error("provider command failed: {what}: {detail}")]
    CommandFailed { what: String, detail: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// A short follow-up hint for the user, where one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::Env(EnvError::NotFound(_)) => Some("check the path, or create the file first"),
            Error::Env(EnvError::Empty(_)) => Some("add at least one KEY=value line"),
            Error::Template(TemplateError::NotFound(_)) => {
                Some("run: envault push <env_file> <vault> <item> to generate one")
            }
            Error::Provider(ProviderError::CliMissing(_)) => {
                Some("install the provider CLI and make sure it is on your PATH")
            }
            Error::Provider(ProviderError::AuthFailed) => {
                Some("sign in manually with the provider CLI, then retry")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
