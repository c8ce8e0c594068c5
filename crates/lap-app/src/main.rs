use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod controller;
mod logging;
mod run;
mod status;
mod summary;

use self::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // .env may point LAP_SETTINGS somewhere else
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings_path = lap_config::settings_path(cli.settings.clone());
    let command = cli.resolved_command();

    let prompt = match &command {
        Command::Run(args) => !args.no_prompt,
        _ => false,
    };

    let result = match command {
        Command::Run(args) => run::run(&settings_path, args).await,
        Command::Monitors => console(|| {
            commands::monitors();
            Ok(())
        }),
        Command::Config { json } => console(|| commands::show_config(&settings_path, json)),
        Command::Set { key, value } => console(|| {
            let key = commands::set(&settings_path, &key, &value)?;
            println!("{key} = {} saved to {}", value.trim(), settings_path.display());
            Ok(())
        }),
        Command::Init => console(|| {
            if commands::init(&settings_path)? {
                println!("Wrote default settings to {}", settings_path.display());
            } else {
                println!("{} already exists, leaving it untouched", settings_path.display());
            }
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_fatal(&e, prompt);
            ExitCode::FAILURE
        }
    }
}

/// One-shot commands only log to the console
fn console(command: impl FnOnce() -> anyhow::Result<()>) -> anyhow::Result<()> {
    if let Err(e) = logging::init(None) {
        eprintln!("{e:#}");
    }
    command()
}

fn report_fatal(error: &anyhow::Error, prompt: bool) {
    tracing::error!("Fatal: {error:#}");
    eprintln!("\nAn error occurred: {error:#}");
    eprintln!("If this looks like a bug, please open an issue and attach log.txt (set DEBUG_LOGGING = true first).");

    if prompt && atty::is(atty::Stream::Stdin) {
        print!("Press Enter to exit...");
        let _ = io::stdout().flush();
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
    }
}
