use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use eqn_cli::repl::Repl;
use eqn_cli::{
    DefaultResolver, EqnConfig, EquationDisplay, EquationViewer, FitSettings, Invocation,
    JsonDisplay, TerminalDisplay,
};
use eqn_source::{find_call_sites, CommandHistory, HistoryLocator, LineRef, ScriptCallLocator};
use eqn_typeset::LatexTypesetter;

#[derive(Parser)]
#[command(name = "eqn")]
#[command(about = "Show a source expression as a typeset equation", long_about = None)]
#[command(version)]
struct Cli {
    /// Expression to show as is
    #[arg(conflicts_with_all = ["file", "script", "history"])]
    expr: Option<String>,

    /// Script containing the expression
    #[arg(long, requires = "line", conflicts_with_all = ["script", "history"])]
    file: Option<PathBuf>,

    /// Line (1-based) on which the expression ends
    #[arg(long, requires = "file")]
    line: Option<usize>,

    /// Show the expression above every call of the directive in a script
    #[arg(long, conflicts_with = "history")]
    script: Option<PathBuf>,

    /// Show the most recent entry of the command history
    #[arg(long)]
    history: bool,

    /// History file to read (default: ~/.eqn_history)
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Do not wait for Enter after drawing
    #[arg(long)]
    no_wait: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Config file (default: ./eqn_config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EQN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✖ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn display_for(cli: &Cli, config: &EqnConfig) -> Box<dyn EquationDisplay> {
    match cli.format {
        Format::Json => Box::new(JsonDisplay::new(io::stdout())),
        Format::Text => {
            let display = TerminalDisplay::new(
                io::stdout(),
                io::stdin().lock(),
                config.cell_width_pt,
                config.cell_height_pt,
            );
            if cli.no_wait {
                Box::new(display.no_wait())
            } else {
                Box::new(display)
            }
        }
    }
}

fn load_history(path: &Path) -> Result<CommandHistory> {
    CommandHistory::load(path).context("no command history to show")
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EqnConfig::load_from(path),
        None => EqnConfig::load(),
    };
    let settings = FitSettings::from(&config);

    if let Some(expr) = &cli.expr {
        let mut viewer = EquationViewer::new(
            LatexTypesetter,
            DefaultResolver::files_only(),
            display_for(&cli, &config),
            settings,
        );
        viewer.view(Invocation::Literal(expr.clone()))?;
        return Ok(());
    }

    if let (Some(path), Some(line)) = (&cli.file, cli.line) {
        let mut viewer = EquationViewer::new(
            LatexTypesetter,
            DefaultResolver::files_only(),
            display_for(&cli, &config),
            settings,
        );
        viewer
            .view(Invocation::At(LineRef::file(path, line)))
            .with_context(|| format!("cannot show line {} of {}", line, path.display()))?;
        return Ok(());
    }

    if let Some(path) = &cli.script {
        let sites = find_call_sites(path, &config.directive)?;
        if sites.is_empty() {
            bail!("no `{}` call in {}", config.directive, path.display());
        }
        let mut viewer = EquationViewer::new(
            LatexTypesetter,
            DefaultResolver::files_only(),
            display_for(&cli, &config),
            settings,
        );
        for site in sites {
            let locator = ScriptCallLocator::new(path, site);
            viewer
                .view(Invocation::Locate(&locator))
                .with_context(|| format!("{}:{}", path.display(), site))?;
        }
        return Ok(());
    }

    if cli.history {
        let path = cli
            .history_file
            .clone()
            .unwrap_or_else(|| config.history_path());
        let history = load_history(&path)?;
        let mut viewer = EquationViewer::new(
            LatexTypesetter,
            DefaultResolver::with_history(&history),
            display_for(&cli, &config),
            settings,
        );
        viewer.view(Invocation::Locate(&HistoryLocator::new(true)))?;
        return Ok(());
    }

    if !io::stdin().is_terminal() {
        bail!("no expression given; pass one, or --file, --script or --history");
    }
    let mut repl = Repl::new(config);
    if let Some(path) = cli.history_file {
        repl = repl.with_history_path(path);
    }
    repl.run()?;
    Ok(())
}
