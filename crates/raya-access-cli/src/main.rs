//! raya-access
//!
//! Command-line front end for managing access to packages on the Raya
//! registry: visibility, team grants, 2FA requirements, and listings.

mod logging;
mod output;

use clap::Parser;
use output::{resolve_color_choice, ListingOutput, StyledOutput};
use raya_access::{
    complete, AccessCommand, AccessError, AccessRouter, CredentialsIdentity, ManifestResolver, OutputSink,
    RegistryClient, RegistrySettings, USAGE,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "raya-access")]
#[command(about = "Manage access to packages on the Raya registry", long_about = None)]
#[command(version, after_help = USAGE)]
struct Cli {
    /// Registry URL (overrides RAYA_REGISTRY and raya.toml)
    #[arg(long)]
    registry: Option<String>,

    /// Output machine-readable JSON
    #[arg(long)]
    json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN")]
    color: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run as if started in DIR
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Print completion candidates for the given words
    #[arg(long, hide = true)]
    complete: bool,

    /// Subcommand followed by its arguments (use `--` before values starting with `-`)
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let styled = StyledOutput::new(resolve_color_choice(cli.color.as_deref()));
    let mut output = ListingOutput::new(styled, cli.json);

    if cli.complete {
        for word in complete(&cli.args)? {
            println!("{}", word);
        }
        return Ok(());
    }

    if let Err(err) = run(&cli, &mut output) {
        if let Some(access_err) = err.downcast_ref::<AccessError>() {
            if access_err.is_usage() {
                output.usage_error(&access_err.to_string());
                std::process::exit(1);
            }
        }
        return Err(err);
    }

    Ok(())
}

fn run(cli: &Cli, output: &mut dyn OutputSink) -> anyhow::Result<()> {
    // Argument errors are reported before any config or credentials are read
    let argv: Vec<Option<&str>> = cli.args.iter().map(|a| Some(a.as_str())).collect();
    let command = AccessCommand::parse(&argv)?;

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let settings = RegistrySettings::new();
    let options = settings.resolve(cli.registry.as_deref(), &cwd)?;
    let identity = CredentialsIdentity::new(settings, options.registry.clone());
    let client = RegistryClient::new()?;

    let router = AccessRouter::new(&ManifestResolver, &identity, &client);
    router.execute(command, &cwd, &options, output)?;

    Ok(())
}
