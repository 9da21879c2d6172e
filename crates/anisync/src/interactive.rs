//! Interactive prompting for missing values and confirmation

use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, Input, Password};

/// Terminal prompter
pub struct Prompter;

impl Prompter {
    /// Fail with `hint` unless a user can answer prompts
    fn require_terminal(hint: &str) -> Result<()> {
        if !std::io::stdin().is_terminal() {
            bail!("{hint}");
        }
        Ok(())
    }

    /// Ask for a non-empty line of text
    ///
    /// # Errors
    ///
    /// Returns an error if no terminal is attached or the prompt fails.
    pub fn text(prompt: &str, hint: &str) -> Result<String> {
        Self::require_terminal(hint)?;
        let input: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|value: &String| {
                if value.trim().is_empty() {
                    Err("Value cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .context("Failed to show prompt")?;
        Ok(input.trim().to_string())
    }

    /// Ask for a password without echoing it
    ///
    /// # Errors
    ///
    /// Returns an error if no terminal is attached or the prompt fails.
    pub fn password(prompt: &str, hint: &str) -> Result<String> {
        Self::require_terminal(hint)?;
        Password::new()
            .with_prompt(prompt)
            .interact()
            .context("Failed to show password prompt")
    }

    /// Ask "Do you want to continue?", defaulting to no
    ///
    /// # Errors
    ///
    /// Returns an error if no terminal is attached or the prompt fails.
    pub fn confirm() -> Result<bool> {
        Self::require_terminal("Refusing to sync without confirmation (pass --yes to skip it)")?;
        Confirm::new()
            .with_prompt("Do you want to continue?")
            .default(false)
            .interact()
            .context("Failed to show confirmation prompt")
    }
}
