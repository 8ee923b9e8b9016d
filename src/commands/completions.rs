//! Shell completion scripts

use crate::cli::args::Cli;
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

pub fn run(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    let mut stdout = io::stdout().lock();
    generate(shell, &mut command, name, &mut stdout);
    stdout.flush()?;
    Ok(())
}
