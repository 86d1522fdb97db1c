use serde::Serialize;

use crate::fit::{Container, Scalable};
use crate::metrics::{text_block, Extent};
use crate::typeset::FALLBACK_MESSAGE;

/// Font size a block is typeset at before fitting, in points.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// What a block shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    /// A typeset equation, with the normalized plain form it came from.
    Equation { latex: String, plain: String },
    /// The literal input plus an explanation, shown as plain text.
    Fallback { literal: String, message: String },
}

/// A typeset block: content, its extent in em, and the font size it is drawn at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBlock {
    pub content: BlockContent,
    pub extent: Extent,
    pub font_size: f64,
}

impl RenderedBlock {
    pub fn equation(latex: impl Into<String>, plain: impl Into<String>, extent: Extent) -> Self {
        Self {
            content: BlockContent::Equation {
                latex: latex.into(),
                plain: plain.into(),
            },
            extent,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Plain-text block showing `literal` above the fallback message.
    pub fn fallback(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let extent = text_block([literal.as_str(), FALLBACK_MESSAGE]);
        Self {
            content: BlockContent::Fallback {
                literal,
                message: FALLBACK_MESSAGE.to_string(),
            },
            extent,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.content, BlockContent::Fallback { .. })
    }

    pub fn latex(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Equation { latex, .. } => Some(latex),
            BlockContent::Fallback { .. } => None,
        }
    }

    pub fn width_pt(&self) -> f64 {
        self.extent.width * self.font_size
    }

    pub fn height_pt(&self) -> f64 {
        self.extent.height() * self.font_size
    }

    /// Text lines for a plain display: the LaTeX source, or literal then message.
    pub fn lines(&self) -> Vec<&str> {
        match &self.content {
            BlockContent::Equation { latex, .. } => vec![latex.as_str()],
            BlockContent::Fallback { literal, message } => vec![literal.as_str(), message.as_str()],
        }
    }
}

impl Scalable for RenderedBlock {
    fn fraction_of(&self, container: &Container) -> (f64, f64) {
        (
            self.width_pt() / container.width,
            self.height_pt() / container.height,
        )
    }

    fn scale_by(&mut self, factor: f64) {
        self.font_size *= factor;
    }
}
