mod args;

use std::io::{self, Write};

use args::Cli;
use clap::Parser;
use miette::{IntoDiagnostic, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging; RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    run(&cli, &mut io::stdout().lock())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let report = glyphcast::convert(&cli.to_config())?;

    if !cli.quiet {
        writeln!(
            out,
            "Successfully converted image to ASCII Art! Saved as {}",
            report.output_path.display()
        )
        .into_diagnostic()?;
    }
    Ok(())
}
