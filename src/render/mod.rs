pub mod context;
pub mod file;

pub use context::{build_context, GenerationContext};
pub use file::{render_str, render_template};
