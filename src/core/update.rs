//! Best-effort check for a newer released version.
//!
//! One short-timeout request against the crates.io registry, rate-limited
//! by a 24-hour cache file under the platform cache directory. This path
//! never blocks or fails the primary command: every failure is downgraded
//! to a debug log and reported as "no update".

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

const REGISTRY_URL: &str = "https://crates.io/api/v1/crates/envault";
const CACHE_TTL_SECS: i64 = 24 * 60 * 60;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Cached result of the last registry check.
#[derive(Debug, Serialize, Deserialize)]
struct UpdateCache {
    /// Unix timestamp of the last successful check.
    checked_at: i64,
    /// Newest version the registry reported.
    latest: String,
}

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    #[serde(rename = "crate")]
    krate: RegistryCrate,
}

#[derive(Debug, Deserialize)]
struct RegistryCrate {
    max_version: String,
}

/// Returns the newer version string if one is available, else `None`.
pub fn check() -> Option<String> {
    let latest = latest_version()?;
    if is_newer(&latest, env!("CARGO_PKG_VERSION")) {
        Some(latest)
    } else {
        None
    }
}

/// Newest registry version, via the cache when fresh.
fn latest_version() -> Option<String> {
    let path = cache_path()?;
    let now = Utc::now().timestamp();

    if let Some(cache) = load_cache(&path) {
        if now - cache.checked_at < CACHE_TTL_SECS {
            debug!(latest = %cache.latest, "using cached update check");
            return Some(cache.latest);
        }
    }

    let latest = fetch_latest()?;
    store_cache(
        &path,
        &UpdateCache {
            checked_at: now,
            latest: latest.clone(),
        },
    );
    Some(latest)
}

fn cache_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join("envault").join("update-check.toml"))
}

fn load_cache(path: &PathBuf) -> Option<UpdateCache> {
    let text = std::fs::read_to_string(path).ok()?;
    toml::from_str(&text).ok()
}

fn store_cache(path: &PathBuf, cache: &UpdateCache) {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(cache)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, text)
    };
    if let Err(e) = write() {
        debug!(error = %e, "failed to write update cache");
    }
}

fn fetch_latest() -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("envault/", env!("CARGO_PKG_VERSION")))
        .build()
        .ok()?;

    match client
        .get(REGISTRY_URL)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.json::<RegistryResponse>())
    {
        Ok(resp) => Some(resp.krate.max_version),
        Err(e) => {
            debug!(error = %e, "update check failed");
            None
        }
    }
}

/// Whether `candidate` is strictly newer than `current`.
///
/// Plain numeric triple compare; anything unparseable is treated as not
/// newer.
fn is_newer(candidate: &str, current: &str) -> bool {
    match (parse_triple(candidate), parse_triple(current)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

fn parse_triple(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.trim().splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts
        .next()
        .unwrap_or("0")
        .split(|c: char| !c.is_ascii_digit())
        .next()?
        .parse()
        .ok()?;
    Some((major, minor, patch))
}
