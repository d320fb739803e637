//! Rendering of issue text using Handlebars.
//!
//! Authored text gets a provenance header crediting the original author,
//! date and source link. Unauthored text passes through unchanged.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TextRenderer, DEFAULT_PROVENANCE_TEMPLATE};
