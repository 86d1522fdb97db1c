//! Equation viewer front end.
//!
//! [`EquationViewer`] ties the pieces together: a caller locator picks the
//! line, the reconstructor assembles the statement, the typesetter renders
//! it, the box-fit scaler sizes it and an [`EquationDisplay`] shows it.

pub mod completer;
pub mod config;
pub mod display;
pub mod repl;
pub mod viewer;

pub use config::EqnConfig;
pub use display::{EquationDisplay, JsonDisplay, TerminalDisplay};
pub use viewer::{
    DefaultResolver, EquationViewer, FitSettings, Invocation, SizedView, SourceResolver,
    ViewError, ViewReport,
};
