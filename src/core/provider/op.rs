//! Subprocess implementation of [`ProviderClient`].
//!
//! Shells out to the provider's CLI binary (`op` by default, overridable
//! through `ENVAULT_PROVIDER_BIN`) and parses its `--format json` output.
//! Provider stderr is carried verbatim into error details so the user sees
//! the provider's own diagnostics.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::trace;

use super::{FieldSpec, ItemSummary, ProviderClient, SecretItem, VaultSummary};
use crate::core::constants::{ITEM_CATEGORY, PROVIDER_BIN, PROVIDER_BIN_ENV};
use crate::error::{ProviderError, Result};

/// Provider CLI client.
pub struct OpClient {
    bin: String,
}

impl OpClient {
    /// Create a client for the configured provider binary.
    pub fn new() -> Self {
        let bin = std::env::var(PROVIDER_BIN_ENV).unwrap_or_else(|_| PROVIDER_BIN.to_string());
        Self { bin }
    }

    /// The binary this client invokes.
    pub fn binary(&self) -> &str {
        &self.bin
    }

    /// Locate the binary on PATH (or as a direct path).
    fn resolve_bin(&self) -> Result<PathBuf> {
        which::which(&self.bin).map_err(|_| ProviderError::CliMissing(self.bin.clone()).into())
    }

    /// Run the provider CLI and capture its output.
    ///
    /// Non-zero exit becomes `CommandFailed` with stderr verbatim.
    fn run(&self, args: &[&str]) -> Result<String> {
        let what = args
            .iter()
            .take(2)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        trace!(command = %what, "invoking provider CLI");

        let output = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ProviderError::CommandFailed {
                what: what.clone(),
                detail: format!("failed to spawn {}: {}", self.bin, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProviderError::CommandFailed {
                what,
                detail: stderr,
            }
            .into());
        }

        String::from_utf8(output.stdout).map_err(|e| {
            ProviderError::InvalidResponse(format!("non-UTF-8 output from {}: {}", what, e)).into()
        })
    }

    /// Run the provider CLI and parse its JSON output.
    fn run_json<T: serde::de::DeserializeOwned>(&self, args: &[&str]) -> Result<T> {
        let stdout = self.run(args)?;
        serde_json::from_str(&stdout)
            .map_err(|e| ProviderError::InvalidResponse(format!("malformed JSON: {}", e)).into())
    }
}

impl Default for OpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderClient for OpClient {
    fn check_cli(&self) -> Result<()> {
        let bin = self.resolve_bin()?;
        trace!(bin = %bin.display(), "provider CLI found");
        self.run(&["--version"])?;
        Ok(())
    }

    fn is_authenticated(&self) -> Result<bool> {
        // Exit status is the answer here, not an error.
        let status = Command::new(&self.bin)
            .args(["whoami", "--format", "json"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ProviderError::CommandFailed {
                what: "whoami".to_string(),
                detail: format!("failed to spawn {}: {}", self.bin, e),
            })?;
        Ok(status.success())
    }

    fn sign_in(&self) -> Result<()> {
        // Interactive: the provider owns the terminal for this step.
        let status = Command::new(&self.bin)
            .arg("signin")
            .status()
            .map_err(|_| ProviderError::AuthFailed)?;
        if !status.success() {
            return Err(ProviderError::AuthFailed.into());
        }
        Ok(())
    }

    fn list_vaults(&self) -> Result<Vec<VaultSummary>> {
        let raw: Vec<RawVault> = self.run_json(&["vault", "list", "--format", "json"])?;
        Ok(raw.into_iter().map(VaultSummary::from).collect())
    }

    fn create_vault(&self, name: &str) -> Result<VaultSummary> {
        let raw: RawVault = self.run_json(&["vault", "create", name, "--format", "json"])?;
        Ok(raw.into())
    }

    fn list_items(&self, vault: &str) -> Result<Vec<ItemSummary>> {
        let raw: Vec<RawItemSummary> =
            self.run_json(&["item", "list", "--vault", vault, "--format", "json"])?;
        Ok(raw.into_iter().map(ItemSummary::from).collect())
    }

    fn get_item(&self, vault: &str, title: &str) -> Result<SecretItem> {
        let raw: RawItem =
            self.run_json(&["item", "get", title, "--vault", vault, "--format", "json"])?;
        Ok(raw.into())
    }

    fn create_item(&self, vault: &str, title: &str, fields: &[FieldSpec]) -> Result<SecretItem> {
        let mut args: Vec<String> = vec![
            "item".into(),
            "create".into(),
            "--vault".into(),
            vault.into(),
            "--title".into(),
            title.into(),
            "--category".into(),
            ITEM_CATEGORY.into(),
            "--format".into(),
            "json".into(),
        ];
        args.extend(fields.iter().map(assignment));

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let raw: RawItem = self.run_json(&arg_refs)?;
        Ok(raw.into())
    }

    fn edit_item(
        &self,
        vault: &str,
        item_id: &str,
        delete_labels: &[String],
        upsert: &[FieldSpec],
    ) -> Result<SecretItem> {
        let mut args: Vec<String> = vec![
            "item".into(),
            "edit".into(),
            item_id.into(),
            "--vault".into(),
            vault.into(),
            "--format".into(),
            "json".into(),
        ];
        args.extend(delete_labels.iter().map(|l| format!("{}[delete]", l)));
        args.extend(upsert.iter().map(assignment));

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let raw: RawItem = self.run_json(&arg_refs)?;
        Ok(raw.into())
    }

    fn inject(&self, template_path: &Path) -> Result<String> {
        let path = template_path.to_string_lossy();
        self.run(&["inject", "-i", path.as_ref()])
    }
}

/// Field assignment argument: `LABEL[type]=value`.
fn assignment(field: &FieldSpec) -> String {
    let kind = if field.concealed { "concealed" } else { "text" };
    format!("{}[{}]={}", field.label, kind, field.value)
}

// ---- wire types ------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawVault {
    id: String,
    name: String,
}

impl From<RawVault> for VaultSummary {
    fn from(v: RawVault) -> Self {
        Self {
            id: v.id,
            name: v.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawItemSummary {
    id: String,
    title: String,
}

impl From<RawItemSummary> for ItemSummary {
    fn from(i: RawItemSummary) -> Self {
        Self {
            id: i.id,
            title: i.title,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    title: String,
    vault: RawVault,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    id: String,
    #[serde(default)]
    label: Option<String>,
    /// Built-in fields (the note body) carry a purpose; user fields don't.
    #[serde(default)]
    purpose: Option<String>,
}

impl From<RawItem> for SecretItem {
    fn from(item: RawItem) -> Self {
        let fields = item
            .fields
            .into_iter()
            .filter(|f| f.purpose.is_none())
            .filter_map(|f| f.label.map(|label| (label, f.id)))
            .collect();
        Self {
            id: item.id,
            title: item.title,
            vault_id: item.vault.id,
            vault_name: item.vault.name,
            fields,
        }
    }
}
