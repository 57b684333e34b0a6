//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envault command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME (and USERPROFILE on Windows) set to the temporary home
    /// - ENVAULT_PROVIDER_BIN pointing at the fake provider script
    /// - Current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("envault").expect("failed to find envault binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CACHE_HOME", self.home.path().join(".cache"));
        cmd.env("ENVAULT_PROVIDER_BIN", &self.provider_bin);
        cmd.env_remove("NO_COLOR");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envault push` with extra flags.
    pub fn push(&self, env_file: &str, vault: &str, item: &str, flags: &[&str]) -> Output {
        self.cmd()
            .args(["push", env_file, vault, item])
            .args(flags)
            .output()
            .expect("failed to run envault push")
    }

    /// Shortcut for `envault pull` with extra flags.
    pub fn pull(&self, template: &str, flags: &[&str]) -> Output {
        self.cmd()
            .args(["pull", template])
            .args(flags)
            .output()
            .expect("failed to run envault pull")
    }
}
