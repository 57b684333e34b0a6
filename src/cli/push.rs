//! Push command - .env file → vault item + reference template.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::output;
use crate::cli::prompt::TermPrompt;
use crate::core::parse::{self, ParseOutcome};
use crate::core::provider::{OpClient, ProviderClient};
use crate::core::sync::{self, FieldDiff, SyncOptions, SyncOutcome};
use crate::core::{template, update};
use crate::error::{EnvError, Result};

/// Push a .env file into a vault item and write back the template.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    env_file: &Path,
    vault: &str,
    item_name: &str,
    output_path: Option<PathBuf>,
    dry_run: bool,
    secret: bool,
    force: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(env_file)
        .map_err(|_| EnvError::NotFound(env_file.display().to_string()))?;

    let outcome = parse::parse(&content);
    for warning in &outcome.warnings {
        output::warn(warning);
    }
    if outcome.variables.is_empty() {
        return Err(EnvError::Empty(env_file.display().to_string()).into());
    }

    let template_path = output_path.unwrap_or_else(|| default_template_path(env_file));
    let provider = OpClient::new();

    if dry_run {
        return report_plan(&provider, &outcome, vault, item_name, &template_path, secret);
    }

    let variables = outcome.unique_variables();
    let options = SyncOptions {
        concealed: secret,
        force,
    };

    let item = match sync::sync(
        &provider,
        &TermPrompt::new(force),
        vault,
        item_name,
        &variables,
        options,
    )? {
        SyncOutcome::Cancelled => {
            output::dimmed("cancelled, nothing changed");
            return Ok(());
        }
        SyncOutcome::Created(item) => {
            output::success(&format!(
                "created item {} with {} fields",
                output::key(&item.title),
                variables.len()
            ));
            item
        }
        SyncOutcome::Updated(item) => {
            output::success(&format!(
                "updated item {} in place",
                output::key(&item.title)
            ));
            item
        }
    };

    let tpl = template::generate(&item.vault_id, &item.id, &outcome.lines, &item.fields)?;
    std::fs::write(&template_path, tpl)?;
    debug!(path = %template_path.display(), "wrote template");

    output::kv("vault", &item.vault_name);
    output::kv("item", &item.title);
    output::kv("template", template_path.display());
    output::hint(&format!(
        "commit {} and run: envault pull {}",
        output::path(&template_path.display().to_string()),
        template_path.display()
    ));

    if let Some(version) = update::check() {
        output::dimmed(&format!("envault {} is available", version));
    }

    Ok(())
}

/// Default template path: the env path with `.tpl` appended.
fn default_template_path(env_file: &Path) -> PathBuf {
    let mut os = env_file.as_os_str().to_os_string();
    os.push(".");
    os.push(crate::core::constants::TEMPLATE_EXT);
    PathBuf::from(os)
}

/// Dry run: read-only checks plus the intended actions, no writes and no
/// provider-mutating calls.
fn report_plan(
    provider: &dyn ProviderClient,
    outcome: &ParseOutcome,
    vault: &str,
    item_name: &str,
    template_path: &Path,
    secret: bool,
) -> Result<()> {
    let variables = outcome.unique_variables();
    let kind = if secret { "concealed" } else { "plain" };

    output::kv("variables", variables.len());
    output::kv("field type", kind);
    output::kv("template", template_path.display());

    provider.check_cli()?;

    if !provider.is_authenticated()? {
        output::warn("not signed in");
        output::list_item("would attempt one interactive sign-in");
        return Ok(());
    }

    let vault_exists = provider.list_vaults()?.iter().any(|v| v.name == vault);
    if !vault_exists {
        output::list_item(&format!("would create vault '{}' (after confirmation)", vault));
        output::list_item(&format!(
            "would create item '{}' with {} fields",
            item_name,
            variables.len()
        ));
        return Ok(());
    }

    let item_exists = provider
        .list_items(vault)?
        .iter()
        .any(|i| i.title == item_name);

    if !item_exists {
        output::list_item(&format!(
            "would create item '{}' in vault '{}' with {} fields",
            item_name,
            vault,
            variables.len()
        ));
    } else {
        let current = provider.get_item(vault, item_name)?;
        let diff = FieldDiff::compute(&current.fields, &variables, secret);
        output::list_item(&format!(
            "would update item '{}': delete {} stale fields, write {} fields",
            item_name,
            diff.delete.len(),
            diff.upsert.len()
        ));
        for label in &diff.delete {
            output::list_item(&format!("  - {}", label));
        }
    }

    output::list_item(&format!("would write {}", template_path.display()));
    Ok(())
}
