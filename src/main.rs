use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use authdemo::config::{config_schema, load_config_from, DEFAULT_CONFIG_PATH};
use authdemo::render::RenderOptions;
use authdemo::startup::{self, Action, StartupError};
use authdemo::utils::logger::init_logging;

#[derive(Parser, Debug)]
#[command(name = "authdemo", about = "Terminal client for a cookie-session auth backend")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "AUTHDEMO_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Never emit ANSI colors.
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a page and print it, e.g. `/dashboard` or `/?error=auth_failed`.
    Open {
        #[arg(default_value = "/")]
        location: String,
    },
    /// Load the home page and press "Sign In".
    SignIn,
    /// Load the home page and press "Sign Out".
    SignOut,
    /// Print the JSON schema of the configuration file.
    Schema,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (location, action) = match cli.command {
        Command::Schema => {
            return match config_schema() {
                Ok(schema) => {
                    println!("{}", schema);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error rendering schema: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
        Command::Open { location } => (location, Action::Open),
        Command::SignIn => ("/".to_string(), Action::SignIn),
        Command::SignOut => ("/".to_string(), Action::SignOut),
    };

    let options = RenderOptions {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    match visit(&cli.config, &location, action, options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn visit(
    config_path: &Path,
    location: &str,
    action: Action,
    options: RenderOptions,
) -> Result<(), StartupError> {
    let config = load_config_from(config_path).map_err(Box::new)?;
    init_logging(&config.logging).map_err(StartupError::Logging)?;

    let report = startup::run(&config, location, action, options).await?;
    for line in &report.lines {
        println!("{}", line);
    }
    if let Some(url) = report.external {
        println!();
        println!("Navigate to: {}", url);
    }
    Ok(())
}
