//! Interactive prompt. Lines are recorded in the command history; the bare
//! directive views the statement recorded before it.

use std::io;
use std::path::PathBuf;

use eqn_source::{is_call_directive, strip_comment, CommandHistory, HistoryLocator};
use eqn_typeset::LatexTypesetter;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::completer::EqnHelper;
use crate::config::EqnConfig;
use crate::display::TerminalDisplay;
use crate::viewer::{DefaultResolver, EquationViewer, FitSettings, Invocation};

/// What one prompt line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Quit,
    Help,
    /// Bare directive: view the previous statement.
    ViewPrevious,
    /// Directive with an argument: view it literally.
    ViewLiteral(String),
    /// Anything else is recorded.
    Record(String),
}

/// `eqn('y = x^2')`, `eqn("y = x^2");` or `eqn y = x^2`.
fn literal_argument(line: &str, directive: &str) -> Option<String> {
    let rest = line.strip_prefix(directive)?;

    if let Some(call) = rest.trim_start().strip_prefix('(') {
        let call = call.trim_end();
        let call = call.strip_suffix(';').unwrap_or(call).trim_end();
        let inner = call.strip_suffix(')')?.trim();
        let quoted = inner
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')))?;
        return Some(quoted.to_string());
    }

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let code = strip_comment(rest);
    let expr = code.trim();
    (!expr.is_empty()).then(|| expr.to_string())
}

pub fn classify(line: &str, directive: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    match line {
        "quit" | "exit" => return ReplCommand::Quit,
        "help" => return ReplCommand::Help,
        _ => {}
    }
    if is_call_directive(&strip_comment(line), directive) {
        return ReplCommand::ViewPrevious;
    }
    match literal_argument(line, directive) {
        Some(expr) => ReplCommand::ViewLiteral(expr),
        None => ReplCommand::Record(line.to_string()),
    }
}

pub struct Repl {
    config: EqnConfig,
    history: CommandHistory,
    history_path: PathBuf,
}

impl Repl {
    pub fn new(config: EqnConfig) -> Self {
        let history_path = config.history_path();
        Self {
            config,
            history: CommandHistory::new(),
            history_path,
        }
    }

    pub fn with_history_path(mut self, path: PathBuf) -> Self {
        self.history_path = path;
        self
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        let directive = self.config.directive.clone();
        println!("Equation viewer. Type an expression, then `{}` to view it.", directive);
        println!("`{} <expr>` views an expression directly; `help` lists commands.", directive);

        let config = rustyline::Config::builder()
            .max_history_size(self.config.history_size)?
            .history_ignore_dups(false)?
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut rl =
            rustyline::Editor::<EqnHelper, rustyline::history::DefaultHistory>::with_config(
                config,
            )?;
        rl.set_helper(Some(EqnHelper::new(&directive)));

        // A missing history file just means a fresh session
        let _ = rl.load_history(&self.history_path);
        self.history = CommandHistory::load(&self.history_path).unwrap_or_else(|e| {
            debug!(error = %e, "starting with empty history");
            CommandHistory::new()
        });

        loop {
            match rl.readline("eqn> ") {
                Ok(line) => match classify(&line, &directive) {
                    ReplCommand::Empty => continue,
                    ReplCommand::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                    ReplCommand::Help => print_help(&directive),
                    ReplCommand::ViewPrevious => {
                        self.show(Invocation::Locate(&HistoryLocator::new(true)))
                    }
                    ReplCommand::ViewLiteral(expr) => self.show(Invocation::Literal(expr)),
                    ReplCommand::Record(entry) => {
                        rl.add_history_entry(entry.as_str())?;
                        self.history.push(entry);
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history on exit (errors are silently ignored)
        let _ = rl.save_history(&self.history_path);

        Ok(())
    }

    fn show(&self, invocation: Invocation<'_>) {
        let display = TerminalDisplay::new(
            io::stdout(),
            io::stdin().lock(),
            self.config.cell_width_pt,
            self.config.cell_height_pt,
        );
        let mut viewer = EquationViewer::new(
            LatexTypesetter,
            DefaultResolver::with_history(&self.history),
            display,
            FitSettings::from(&self.config),
        );
        if let Err(e) = viewer.view(invocation) {
            eprintln!("✖ {}", e);
        }
    }
}

fn print_help(directive: &str) {
    println!("Commands:");
    println!("  <expr>                 Record a statement (end a line with ... to continue it)");
    println!("  {:<22} View the statement entered before this line", directive);
    println!("  {:<22} View an expression without recording it", format!("{} <expr>", directive));
    println!("  help                   Show this help");
    println!("  quit / exit            Leave");
}
