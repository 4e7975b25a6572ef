pub mod locate;
pub mod search_path;

pub use locate::{locate, locate_or_err, shadowed};
pub use search_path::{SearchPath, TemplateRoots};
