//! Provider client seam.
//!
//! The synchronizer talks to the secret-storage provider through the
//! [`ProviderClient`] trait, never through a subprocess-specific type. The
//! production implementation ([`op::OpClient`]) shells out to the
//! provider's CLI binary; tests substitute an in-memory fake.

pub mod op;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

pub use op::OpClient;

/// A vault as listed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSummary {
    pub id: String,
    pub name: String,
}

/// An item as listed within a vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: String,
    pub title: String,
}

/// Snapshot of a provider item after a get/create/edit.
///
/// `fields` maps the field label (the env key) to the provider-assigned
/// field id. Built-in provider fields (the note body and friends) are
/// excluded; only user fields appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretItem {
    pub id: String,
    pub title: String,
    pub vault_id: String,
    pub vault_name: String,
    pub fields: BTreeMap<String, String>,
}

/// One field to write on create or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: String,
    pub value: String,
    /// Concealed fields are masked in the provider's UI.
    pub concealed: bool,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, value: impl Into<String>, concealed: bool) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            concealed,
        }
    }
}

/// Logical operations the provider CLI exposes.
///
/// One method per operation the synchronizer and the pull flow need; the
/// result shapes are the contract, the invocation syntax is up to the
/// implementation.
pub trait ProviderClient {
    /// Verify the provider CLI is installed and runnable.
    fn check_cli(&self) -> Result<()>;

    /// Whether a session is currently authenticated.
    fn is_authenticated(&self) -> Result<bool>;

    /// One interactive sign-in attempt.
    fn sign_in(&self) -> Result<()>;

    fn list_vaults(&self) -> Result<Vec<VaultSummary>>;

    fn create_vault(&self, name: &str) -> Result<VaultSummary>;

    fn list_items(&self, vault: &str) -> Result<Vec<ItemSummary>>;

    fn get_item(&self, vault: &str, title: &str) -> Result<SecretItem>;

    /// Create a Secure Note item carrying the given fields.
    fn create_item(&self, vault: &str, title: &str, fields: &[FieldSpec]) -> Result<SecretItem>;

    /// Edit an existing item: delete the labeled fields and (re)write the
    /// given specs, in a single provider invocation.
    fn edit_item(
        &self,
        vault: &str,
        item_id: &str,
        delete_labels: &[String],
        upsert: &[FieldSpec],
    ) -> Result<SecretItem>;

    /// Resolve a template file's references into literal text.
    fn inject(&self, template_path: &Path) -> Result<String>;
}
