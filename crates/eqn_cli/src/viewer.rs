//! The equation viewer: locate, reconstruct, typeset, fit, display.

use std::io;

use eqn_source::{
    reconstruct, CallerLocator, CommandHistory, FileSource, LineRef, LocateError,
    LogicalExpression, ReconstructError, SourceId,
};
use eqn_typeset::{
    grow_to_fill, shrink_container_to_aspect, typeset_or_fallback, Container, RenderedBlock,
    ScalerError, Typesetter,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EqnConfig;
use crate::display::EquationDisplay;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),

    #[error("cannot lay out equation: {0}")]
    Fit(#[from] ScalerError),

    #[error("display failed: {0}")]
    Display(#[from] io::Error),
}

/// Where the viewer takes its expression from.
pub enum Invocation<'a> {
    /// Use the string as is; no source is read.
    Literal(String),
    /// The statement ending at a known line.
    At(LineRef),
    /// The statement just above the caller.
    Locate(&'a dyn CallerLocator),
}

/// Maps a line reference to the logical expression ending there.
pub trait SourceResolver {
    fn reconstruct_at(&self, at: &LineRef) -> Result<LogicalExpression, ViewError>;
}

/// Reads script files from disk and history from an optional loaded log.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResolver<'h> {
    pub history: Option<&'h CommandHistory>,
}

impl<'h> DefaultResolver<'h> {
    pub fn files_only() -> Self {
        Self { history: None }
    }

    pub fn with_history(history: &'h CommandHistory) -> Self {
        Self {
            history: Some(history),
        }
    }
}

impl SourceResolver for DefaultResolver<'_> {
    fn reconstruct_at(&self, at: &LineRef) -> Result<LogicalExpression, ViewError> {
        let logical = match &at.source {
            SourceId::File(path) => reconstruct(&FileSource::new(path), at.index)?,
            SourceId::History => {
                let history = self.history.ok_or_else(|| {
                    LocateError::NoCallerContext("no command history is available".to_string())
                })?;
                reconstruct(history, at.index)?
            }
        };
        Ok(logical)
    }
}

/// Fitting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSettings {
    pub container: Container,
    pub target_fraction: f64,
    pub initial_font_size: f64,
}

impl From<&EqnConfig> for FitSettings {
    fn from(config: &EqnConfig) -> Self {
        Self {
            container: config.container(),
            target_fraction: config.target_fraction,
            initial_font_size: config.initial_font_size,
        }
    }
}

impl Default for FitSettings {
    fn default() -> Self {
        Self::from(&EqnConfig::default())
    }
}

/// A block fitted to its trimmed container, ready to show.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedView {
    pub expression: String,
    pub block: RenderedBlock,
    pub container: Container,
}

impl SizedView {
    pub fn report(&self) -> ViewReport<'_> {
        ViewReport {
            expression: &self.expression,
            latex: self.block.latex(),
            fallback: self.block.is_fallback(),
            font_size: self.block.font_size,
            container: self.container,
        }
    }
}

/// Machine-readable summary of a view.
#[derive(Debug, Serialize)]
pub struct ViewReport<'a> {
    pub expression: &'a str,
    pub latex: Option<&'a str>,
    pub fallback: bool,
    pub font_size: f64,
    pub container: Container,
}

pub struct EquationViewer<T, R, D> {
    typesetter: T,
    resolver: R,
    display: D,
    settings: FitSettings,
}

impl<T, R, D> EquationViewer<T, R, D>
where
    T: Typesetter,
    R: SourceResolver,
    D: EquationDisplay,
{
    pub fn new(typesetter: T, resolver: R, display: D, settings: FitSettings) -> Self {
        Self {
            typesetter,
            resolver,
            display,
            settings,
        }
    }

    /// Show one equation and block until the display is dismissed.
    pub fn view(&mut self, invocation: Invocation<'_>) -> Result<SizedView, ViewError> {
        let expression = self.expression_for(invocation)?;
        let view = self.prepare(expression)?;
        self.display.show_modal(&view)?;
        Ok(view)
    }

    fn expression_for(&self, invocation: Invocation<'_>) -> Result<String, ViewError> {
        match invocation {
            Invocation::Literal(expr) => Ok(expr),
            Invocation::At(at) => Ok(self.resolver.reconstruct_at(&at)?.into_string()),
            Invocation::Locate(locator) => {
                let at = locator.locate_caller()?;
                debug!(at = %at, "located caller");
                Ok(self.resolver.reconstruct_at(&at)?.into_string())
            }
        }
    }

    /// Typeset and fit without displaying.
    pub fn prepare(&self, expression: String) -> Result<SizedView, ViewError> {
        let block = typeset_or_fallback(&self.typesetter, &expression)
            .with_font_size(self.settings.initial_font_size);
        let container = self.settings.container;
        let block = grow_to_fill(block, &container, self.settings.target_fraction)?;
        let container = shrink_container_to_aspect(container, &block)?;

        info!(
            expression = %expression,
            font_size = block.font_size,
            fallback = block.is_fallback(),
            "equation ready"
        );
        Ok(SizedView {
            expression,
            block,
            container,
        })
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
