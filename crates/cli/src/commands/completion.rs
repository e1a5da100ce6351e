//! Shell completion scripts for `svcdiff`

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap::ValueEnum;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

const BIN_NAME: &str = "svcdiff";

pub struct Options {
    pub shell: String,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options, &mut io::stdout()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            e.exit_code()
        }
    }
}

fn supported_shells() -> String {
    Shell::value_variants()
        .iter()
        .filter_map(|shell| shell.to_possible_value())
        .map(|value| value.get_name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shell names are matched case-insensitively
fn parse_shell(name: &str) -> CliResult<Shell> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Message(format!(
            "Shell name is required. Supported shells: {}",
            supported_shells()
        )));
    }
    <Shell as ValueEnum>::from_str(name, true).map_err(|_| {
        CliError::Message(format!(
            "Unsupported shell: {name}. Supported shells: {}",
            supported_shells()
        ))
    })
}

fn run_inner(options: &Options, out: &mut dyn Write) -> CliResult<()> {
    let shell = parse_shell(&options.shell)?;
    generate(shell, &mut get_cli_command(), BIN_NAME, out);
    Ok(())
}
