//! Kindle CLI - Scaffold React apps with Vite or Bun and reshape them later

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use kindle_core::{
    Bundler, ConsoleReporter, FeatureFlags, LintVariant, QuietReporter, Reporter, Session,
    Settings, Stack, SubstringSniffer, SystemRunner,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter for diagnostic logging; defaults to `warn`
const LOG_ENV: &str = "KINDLE_LOG";

#[derive(Parser, Debug)]
#[command(name = "kindle")]
#[command(about = "Scaffold React + TypeScript apps (Vite or Bun) and add or remove stacks later")]
#[command(version)]
pub struct Cli {
    /// Plain output without spinners
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (defaults to $KINDLE_CONFIG, then ./kindle.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold a new project directory
    New(NewArgs),
    /// Add a stack to the project in the current directory
    Add {
        stack: Stack,

        /// Only valid for `kindle new --mantine`
        #[arg(long)]
        styled: bool,
    },
    /// Remove a stack from the project in the current directory
    Remove { stack: Stack },
    /// Switch eslint.config.js between presets
    Lint { action: LintAction },
}

#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Project directory name
    pub name: String,

    #[arg(long, value_enum)]
    pub bundler: Option<Bundler>,

    /// Add Mantine and wrap the app in MantineProvider
    #[arg(long)]
    pub mantine: bool,

    /// Styled Mantine landing page (requires --mantine)
    #[arg(long)]
    pub styled: bool,

    /// Dockerfile and docker-compose.yml
    #[arg(long)]
    pub docker: bool,

    #[arg(long)]
    pub vercel: bool,

    #[arg(long)]
    pub netlify: bool,

    #[arg(long)]
    pub storybook: bool,

    /// Bun API server in backend/ (Vite only)
    #[arg(long)]
    pub backend: bool,

    #[arg(long)]
    pub no_tailwind: bool,

    #[arg(long)]
    pub no_react_query: bool,

    #[arg(long)]
    pub no_zustand: bool,

    #[arg(long)]
    pub no_eslint: bool,

    #[arg(long)]
    pub no_prettier: bool,

    #[arg(long)]
    pub no_husky: bool,

    #[arg(long)]
    pub no_framer_motion: bool,

    /// Don't launch the dev server when done
    #[arg(long)]
    pub no_start: bool,
}

impl From<&NewArgs> for FeatureFlags {
    fn from(args: &NewArgs) -> Self {
        FeatureFlags {
            bundler: args.bundler,
            mantine: args.mantine,
            styled: args.styled,
            docker: args.docker,
            vercel: args.vercel,
            netlify: args.netlify,
            storybook: args.storybook,
            backend: args.backend,
            no_tailwind: args.no_tailwind,
            no_react_query: args.no_react_query,
            no_zustand: args.no_zustand,
            no_eslint: args.no_eslint,
            no_prettier: args.no_prettier,
            no_husky: args.no_husky,
            no_framer_motion: args.no_framer_motion,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LintAction {
    /// Drop unicorn and import ordering, keep core recommended rules
    Relax,
    /// Restore the strict preset
    Reset,
}

impl From<LintAction> for LintVariant {
    fn from(action: LintAction) -> Self {
        match action {
            LintAction::Relax => LintVariant::Relaxed,
            LintAction::Reset => LintVariant::Strict,
        }
    }
}

/// Initialize tracing on stderr so it never mixes with command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli, cwd: &Path) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref(), cwd).context("Failed to load settings")?;

    let reporter: Box<dyn Reporter> = if cli.quiet || settings.quiet {
        Box::new(QuietReporter)
    } else {
        Box::new(ConsoleReporter::new())
    };
    let session = Session::new(&SystemRunner, reporter.as_ref(), &SubstringSniffer);

    let summary = match cli.command {
        Command::New(args) => {
            let plan = settings.requested_plan(&args.name, &FeatureFlags::from(&args));
            let start = settings.start_dev_server && !args.no_start;
            kindle_core::run_new(&session, cwd, plan, start)?
        }
        Command::Add { stack, styled } => kindle_core::run_add(&session, cwd, stack, styled)?,
        Command::Remove { stack } => kindle_core::run_remove(&session, cwd, stack)?,
        Command::Lint { action } => kindle_core::run_lint(&session, cwd, action.into())?,
    };

    tracing::debug!(changed = ?summary.changed_paths(), "command finished");
    Ok(())
}

fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        kindle_core::restore_terminal();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        kindle_core::restore_terminal();
        std::process::exit(130);
    })
    .ok();

    init_tracing();
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .context("Failed to read the current directory")
        .and_then(|cwd| run(cli, &cwd));

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
