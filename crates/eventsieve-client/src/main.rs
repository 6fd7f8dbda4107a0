//! eventsieve CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use eventsieve_client::cli::{Cli, Command, ConfigAction};
use eventsieve_client::commands;
use eventsieve_client::config::ClientConfig;
use eventsieve_client::error::ClientResult;
use eventsieve_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);

    // `config path` must work even when the file does not parse
    if let Command::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        let config = ClientConfig::load_from(&config_path).unwrap_or_default();
        return commands::config::path(&config_path, &config, &mut io::stdout().lock());
    }

    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    let user_id = cli.user.as_deref().unwrap_or(config.user_id()).to_string();

    match cli.command {
        Command::Show(ref args) => commands::show::run(args, &config, &user_id),
        Command::Filters { ref action } => commands::filters::run(action, &config, &user_id),
        Command::Config { action } => {
            let mut out = io::stdout().lock();
            match action {
                ConfigAction::Dump => commands::config::dump(&config, &config_path, &mut out),
                ConfigAction::Validate => commands::config::validate(&config, &mut out),
                ConfigAction::Path => commands::config::path(&config_path, &config, &mut out),
            }
        }
    }
}
