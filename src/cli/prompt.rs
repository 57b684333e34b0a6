//! Terminal confirmation prompt.

use dialoguer::Confirm;

use crate::core::sync::ConfirmPrompt;
use crate::error::Result;

/// Interactive prompt backed by dialoguer.
///
/// With `force` set every confirmation is answered yes without asking.
/// When stdin is not a terminal a confirmation counts as declined: scripts
/// must opt into destructive actions with `--force`.
pub struct TermPrompt {
    force: bool,
}

impl TermPrompt {
    pub fn new(force: bool) -> Self {
        Self { force }
    }
}

impl ConfirmPrompt for TermPrompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.force {
            return Ok(true);
        }
        if !atty::is(atty::Stream::Stdin) {
            return Ok(false);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
