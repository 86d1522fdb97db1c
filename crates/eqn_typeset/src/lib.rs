//! Turns an expression string into a measured, sizeable block.
//!
//! [`typeset`] parses and renders LaTeX, [`metrics`] estimates the block's
//! extent, and [`fit`] grows the text to fill a container before shrinking
//! the container to the text's aspect.

pub mod block;
pub mod error;
pub mod fit;
pub mod metrics;
pub mod typeset;

pub use block::{BlockContent, RenderedBlock};
pub use error::{ScalerError, TypesetError};
pub use fit::{
    grow_to_fill, shrink_container_to_aspect, Container, Scalable, DEFAULT_TARGET_FRACTION,
    MAX_GROW_ITERATIONS,
};
pub use metrics::Extent;
pub use typeset::{typeset, typeset_or_fallback, LatexTypesetter, Typesetter, FALLBACK_MESSAGE};
