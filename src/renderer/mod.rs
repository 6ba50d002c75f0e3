//! Template rendering
//!
//! - `interface`: The `TemplateRenderer` trait and the `Rendered` result
//! - `options`: Unresolved placeholder policy and render settings
//! - `placeholder`: The `{{NAME}}` substitution engine

pub mod interface;
pub mod options;
pub mod placeholder;

pub use interface::{Rendered, TemplateRenderer};
pub use options::{RenderOptions, UnresolvedPolicy};
pub use placeholder::PlaceholderRenderer;

/// Creates a boxed renderer for the given options.
pub fn get_renderer(options: RenderOptions) -> Box<dyn TemplateRenderer> {
    Box::new(PlaceholderRenderer::with_options(options))
}
