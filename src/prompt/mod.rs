//! Interactive prompts for values the supplied sources left out
//!
//! The `ValuePrompter` interface is independent of any UI library;
//! `DialoguerPrompter` is the terminal implementation used by the CLI.

use crate::error::Result;
use dialoguer::Input;

/// Asks the user for the value of one placeholder.
pub trait ValuePrompter {
    /// Returns `None` when the user leaves the answer empty, which keeps the
    /// placeholder unresolved.
    fn prompt_value(&self, name: &str) -> Result<Option<String>>;
}

/// Terminal prompts backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl ValuePrompter for DialoguerPrompter {
    fn prompt_value(&self, name: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(format!("Value for {name} (leave empty to fill in later)"))
            .allow_empty(true)
            .interact_text()?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }
}
