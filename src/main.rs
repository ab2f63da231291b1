use clap::{ArgAction, Parser};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use error_dispatch::logging::{init_logging, LoggingConfig};
use error_dispatch::{
    action, DefaultHandler, DispatchConfig, ErrorHandler, ErrorHandlerBuilder, MatchPolicy,
};

#[derive(Parser, Debug)]
#[command(name = "dispatch-demo")]
#[command(version)]
#[command(about = "Runs sample network errors through a declarative error handler")]
struct Cli {
    /// Rule evaluation policy: all or first (overrides the config file)
    #[arg(long, value_name = "POLICY")]
    policy: Option<MatchPolicy>,

    /// Load handler settings from a TOML file
    #[arg(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v results, -vv matched rules)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NetworkError {
    Timeout,
    Unauthorized,
    ServerError,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkError::Timeout => "timeout",
            NetworkError::Unauthorized => "unauthorized",
            NetworkError::ServerError => "server error",
        };
        f.write_str(name)
    }
}

fn build_handler(config: &DispatchConfig) -> ErrorHandler<NetworkError> {
    ErrorHandlerBuilder::<NetworkError>::new()
        .with_config(config)
        .always(|_| println!("1️⃣ First unconditional"))
        .when_all(
            |e| *e == NetworkError::Timeout,
            [
                action(|_: &NetworkError| println!("⏳ Timeout handler 1")),
                action(|_: &NetworkError| println!("⏳ Timeout handler 2")),
            ],
        )
        .always(|_| println!("2️⃣ Second unconditional"))
        .when_all(
            |e| *e == NetworkError::Unauthorized,
            [
                action(|_: &NetworkError| println!("🔒 Auth handler 1")),
                action(|_: &NetworkError| println!("🔒 Auth handler 2")),
                action(|_: &NetworkError| println!("🔒 Auth handler 3")),
            ],
        )
        .always(|_| println!("3️⃣ Third unconditional"))
        .build()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_verbosity(cli.verbose));

    let mut config = match &cli.config {
        Some(path) => match DispatchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => DispatchConfig::default(),
    };
    if let Some(policy) = cli.policy {
        config.match_policy = policy;
    }

    let handler = build_handler(&config);
    let fallback = DefaultHandler::stderr();

    println!("Testing multiple actions per condition...");

    for error in [
        NetworkError::Timeout,
        NetworkError::Unauthorized,
        NetworkError::ServerError,
    ] {
        println!("\nHandling {}:", error);
        let result = handler.handle_with(&error, |result| {
            let outcome = if result.is_handled() {
                "handled"
            } else {
                "not handled"
            };
            println!("Completion: Error was {}", outcome);
        });
        if !result.is_handled() {
            fallback.handle_uncaught(&error);
        }
    }

    println!("\nTest completed.");
    ExitCode::SUCCESS
}
