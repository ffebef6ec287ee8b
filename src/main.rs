//! htmlstamp - stamp staged HTML footers with a last-modified date.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use htmlstamp::cli::{self, Context};
use htmlstamp::Error;

#[derive(Parser)]
#[command(name = "htmlstamp")]
#[command(about = "Stamp staged HTML files with a last-modified footer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check staged HTML files can be stamped
    Check,

    /// Stamp staged HTML files with today's date
    Stamp {
        /// Keep a .bkup copy of every rewritten file
        #[arg(long)]
        backup: bool,

        /// Date to stamp instead of today (DD/Mon/YYYY)
        #[arg(long)]
        date: Option<String>,
    },

    /// Check, then stamp (what the pre-commit hook runs)
    Run {
        /// Keep a .bkup copy of every rewritten file
        #[arg(long)]
        backup: bool,
    },

    /// List staged files that would be stamped
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Install the pre-commit hook in this repository
    InstallHook {
        /// Overwrite an existing pre-commit hook
        #[arg(long, short)]
        force: bool,
    },

    /// Remove htmlstamp from the pre-commit hook
    UninstallHook,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("htmlstamp={}", level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Open the repository and start logging at its configured level.
fn context() -> Result<Context, Error> {
    let ctx = Context::from_current_dir()?;
    init_logging(&ctx.config.log_level);
    Ok(ctx)
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::InstallHook { force } => {
            init_logging("info");
            cli::hooks::install(&cli::current_root()?, force)?;
        }
        Commands::UninstallHook => {
            init_logging("info");
            cli::hooks::uninstall(&cli::current_root()?)?;
        }
        Commands::Check => cli::check::run(&context()?)?,
        Commands::Stamp { backup, date } => cli::stamp::run(&context()?, date, backup)?,
        Commands::Run { backup } => cli::run::run(&context()?, backup)?,
        Commands::Status { json } => cli::status::run(&context()?, json)?,
    }

    Ok(())
}
