//! Completions command implementation
//!
//! Handles the `bundle-diff completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

use crate::cli::Cli;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// bundle-diff completions bash > /etc/bash_completion.d/bundle-diff
///
/// # Zsh
/// bundle-diff completions zsh > ~/.zfunc/_bundle-diff
///
/// # Fish
/// bundle-diff completions fish > ~/.config/fish/completions/bundle-diff.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "bundle-diff", out);
}
