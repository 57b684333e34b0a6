//! Test support utilities for envault integration tests.
//!
//! Provides an isolated test environment with a scripted fake provider
//! CLI, wired in through `ENVAULT_PROVIDER_BIN`.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Shell script standing in for the provider CLI. Responds with canned
/// JSON from the state directory and logs every invocation.
const FAKE_PROVIDER: &str = r#"#!/usr/bin/env bash
STATE="__STATE__"
echo "$*" >> "$STATE/calls.log"

canned() { if [ -f "$STATE/$1" ]; then cat "$STATE/$1"; else echo "$2"; fi; }

case "$1 $2" in
  "--version "*)
    echo "2.30.0" ;;
  "whoami "*)
    [ -f "$STATE/authenticated" ] || exit 1
    echo '{"user_uuid":"u1"}' ;;
  "signin "*)
    [ -f "$STATE/fail_signin" ] && exit 1
    touch "$STATE/authenticated" ;;
  "vault list")
    canned vaults.json "[]" ;;
  "vault create")
    [ -f "$STATE/fail_vault_create" ] && { echo "[ERROR] vault create rejected" >&2; exit 1; }
    printf '{"id":"v-new","name":"%s"}\n' "$3" ;;
  "item list")
    canned items.json "[]" ;;
  "item get")
    [ -f "$STATE/item.json" ] || { echo "item not found" >&2; exit 1; }
    cat "$STATE/item.json" ;;
  "item create")
    [ -f "$STATE/fail_create" ] && { echo "[ERROR] create rejected" >&2; exit 1; }
    canned created.json "{}" ;;
  "item edit")
    [ -f "$STATE/fail_edit" ] && { echo "[ERROR] edit rejected" >&2; exit 1; }
    canned edited.json "{}" ;;
  "inject -i")
    cat "$STATE/inject.txt" ;;
  *)
    echo "unexpected invocation: $*" >&2
    exit 64 ;;
esac
"#;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir, home dir, and provider state dir.
/// No process-global state is mutated — child processes use
/// `.current_dir()` so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
    /// State directory the fake provider reads its responses from
    pub state: PathBuf,
    /// Path to the fake provider script
    pub provider_bin: PathBuf,
}

impl Test {
    /// Create a new empty test environment with the fake provider set up.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        let state = home.path().join("provider-state");
        fs::create_dir_all(&state).expect("failed to create state dir");

        let provider_bin = home.path().join("fake-provider");
        let script = FAKE_PROVIDER.replace("__STATE__", &state.to_string_lossy());
        fs::write(&provider_bin, script).expect("failed to write fake provider");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&provider_bin, fs::Permissions::from_mode(0o755))
                .expect("failed to chmod fake provider");
        }

        let t = Self {
            dir,
            home,
            state,
            provider_bin,
        };
        t.seed_update_cache();
        t
    }

    /// Create an environment that is already signed in with one vault.
    pub fn signed_in(vault: &str) -> Self {
        let t = Self::new();
        t.authenticate();
        t.set_vaults(&format!(r#"[{{"id": "v1", "name": "{}"}}]"#, vault));
        t
    }

    /// Pre-seed the update-check cache so tests never touch the network.
    fn seed_update_cache(&self) {
        let cache = "checked_at = 4102444800\nlatest = \"0.0.0\"\n";
        for dir in [
            self.home.path().join(".cache").join("envault"),
            self.home
                .path()
                .join("Library")
                .join("Caches")
                .join("envault"),
        ] {
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("update-check.toml"), cache).unwrap();
        }
    }

    // ---- provider state ------------------------------------------------

    /// Mark the fake provider session as authenticated.
    pub fn authenticate(&self) {
        fs::write(self.state.join("authenticated"), "").unwrap();
    }

    /// Set the JSON the fake provider returns for `vault list`.
    pub fn set_vaults(&self, json: &str) {
        fs::write(self.state.join("vaults.json"), json).unwrap();
    }

    /// Set the JSON the fake provider returns for `item list`.
    pub fn set_items(&self, json: &str) {
        fs::write(self.state.join("items.json"), json).unwrap();
    }

    /// Set the JSON the fake provider returns for `item get`.
    pub fn set_item(&self, json: &str) {
        fs::write(self.state.join("item.json"), json).unwrap();
    }

    /// Set the JSON the fake provider returns for `item create`.
    pub fn set_created(&self, json: &str) {
        fs::write(self.state.join("created.json"), json).unwrap();
    }

    /// Set the JSON the fake provider returns for `item edit`.
    pub fn set_edited(&self, json: &str) {
        fs::write(self.state.join("edited.json"), json).unwrap();
    }

    /// Set the text the fake provider returns for `inject`.
    pub fn set_inject(&self, text: &str) {
        fs::write(self.state.join("inject.txt"), text).unwrap();
    }

    /// Make a specific fake provider operation fail.
    pub fn fail(&self, what: &str) {
        fs::write(self.state.join(format!("fail_{}", what)), "").unwrap();
    }

    /// Every provider invocation so far, one line of args per call.
    pub fn provider_calls(&self) -> Vec<String> {
        fs::read_to_string(self.state.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    // ---- project files ---------------------------------------------------

    /// Write a file inside the project dir, returning its absolute path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Read a project file as a string.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("failed to read test file")
    }

    /// Whether a project file exists.
    pub fn has_file(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Absolute path of a project file.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for Test {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: path as &str for building args.
pub fn path_str(p: &Path) -> String {
    p.to_string_lossy().to_string()
}
