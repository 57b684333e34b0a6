//! Pull command - reference template → resolved .env file.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroize;

use crate::cli::output;
use crate::cli::prompt::TermPrompt;
use crate::core::provider::{OpClient, ProviderClient};
use crate::core::sync::{self, ConfirmPrompt};
use crate::core::{header, template, update};
use crate::error::{Result, TemplateError};

/// Pull current values through a template into a .env file.
pub fn execute(
    template_file: &Path,
    output_path: Option<PathBuf>,
    dry_run: bool,
    force: bool,
) -> Result<()> {
    if !template_file.exists() {
        return Err(TemplateError::NotFound(template_file.display().to_string()).into());
    }

    let out_path = output_path.unwrap_or_else(|| default_env_path(template_file));
    let provider = OpClient::new();

    if dry_run {
        return report_plan(&provider, template_file, &out_path, force);
    }

    // Overwrite confirmation happens before any provider call so declining
    // leaves no side effects at all.
    if out_path.exists()
        && !TermPrompt::new(force).confirm(&format!(
            "{} already exists, overwrite it?",
            out_path.display()
        ))?
    {
        output::dimmed("cancelled, existing file left untouched");
        return Ok(());
    }

    sync::ensure_ready(&provider)?;

    let mut resolved = provider.inject(template_file)?;
    let mut body = header::strip(&resolved);
    let mut framed = header::prepend(&body, &template_file.display().to_string());

    let result = std::fs::write(&out_path, &framed);
    resolved.zeroize();
    body.zeroize();
    framed.zeroize();
    result?;
    debug!(path = %out_path.display(), "wrote env file");

    output::success(&format!("pulled secrets into {}", output::path(&out_path.display().to_string())));
    output::hint("do not commit the resolved file");

    if let Some(version) = update::check() {
        output::dimmed(&format!("envault {} is available", version));
    }

    Ok(())
}

/// Default output path: the template path with a trailing `.tpl` removed,
/// or `.env` appended when there is nothing to strip.
fn default_env_path(template_file: &Path) -> PathBuf {
    let s = template_file.as_os_str().to_string_lossy();
    match s.strip_suffix(".tpl") {
        Some(stripped) if !stripped.is_empty() => PathBuf::from(stripped),
        _ => PathBuf::from(format!("{}.env", s)),
    }
}

/// Dry run: read-only checks plus the intended actions; inject is skipped
/// because it would materialize secret values.
fn report_plan(
    provider: &dyn ProviderClient,
    template_file: &Path,
    out_path: &Path,
    force: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(template_file)?;
    let keys = template::reference_keys(&text);

    output::kv("references", keys.len());
    output::kv("output", out_path.display());

    provider.check_cli()?;
    if !provider.is_authenticated()? {
        output::warn("not signed in");
        output::list_item("would attempt one interactive sign-in");
    }

    if out_path.exists() {
        if force {
            output::list_item("would overwrite the existing file (--force)");
        } else {
            output::list_item("would ask before overwriting the existing file");
        }
    }
    output::list_item(&format!(
        "would resolve {} references and write {}",
        keys.len(),
        out_path.display()
    ));
    Ok(())
}
