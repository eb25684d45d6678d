use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use platform_complete::commands::suggest::SuggestKind;
use platform_complete::commands::{complete, context, profiles, suggest};
use platform_complete::completions::{
    generate_completions, write_hook, Shell, NOT_HANDLED_STATUS,
};
use platform_complete::config::Settings;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "platform-complete")]
#[command(
    about = "Completions for --id, --name and --profile backed by the platform catalog",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Profile whose catalog serves lines and listings that name no profile
    #[arg(long, global = true, env = "AWS_PROFILE", default_value = "default")]
    profile: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List AWS profiles found in the shared config and credentials files
    Profiles,

    /// List catalog suggestions for provider ids or customer names
    Suggest {
        #[arg(value_enum)]
        kind: SuggestKind,
    },

    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print a hook completing another command's --id, --name and --profile
    Hook {
        #[arg(value_enum)]
        shell: Shell,

        /// Command whose completions are routed through this helper
        command: String,
    },

    /// Internal: Dynamic completion helper (invoked by shell)
    #[command(hide = true)]
    Complete {
        /// Command line text before the cursor, as a single argument
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
}

/// Logs go to stderr; stdout is reserved for suggestions.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(verbose > 1),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Profiles => {
            let store = context::load_profiles()?;
            profiles::execute(&store, &mut stdout)?;
        }
        Commands::Suggest { kind } => {
            let settings = Settings::load_or_default(cli.config.as_deref())?;
            let dispatcher = context::build_dispatcher(&settings, &cli.profile)?;
            suggest::execute(&dispatcher, kind, &mut stdout)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut stdout);
        }
        Commands::Hook { shell, command } => {
            let bin = Cli::command().get_name().to_string();
            write_hook(shell, &bin, &command, &mut stdout)?;
        }
        Commands::Complete { text } => {
            let settings = Settings::load_or_default(cli.config.as_deref())?;
            let dispatcher = context::build_dispatcher(&settings, &cli.profile)?;
            if !complete::execute(&dispatcher, &text, &mut stdout)? {
                return Ok(ExitCode::from(NOT_HANDLED_STATUS));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
