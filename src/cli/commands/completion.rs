//! completion command - Generate shell completion scripts

use std::io::Write;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::args::Cli;

/// Write the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    write_script(shell, &mut std::io::stdout());
    Ok(())
}

/// Generate the script into any writer; split out so tests can capture it.
fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_cover_the_command_surface() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let mut buf = Vec::new();
            write_script(shell, &mut buf);
            let script = String::from_utf8(buf).unwrap();

            assert!(script.contains("gantry"), "{} misses binary name", shell);
            assert!(script.contains("launch"), "{} misses launch", shell);
            assert!(script.contains("plan"), "{} misses plan", shell);
        }
    }
}
