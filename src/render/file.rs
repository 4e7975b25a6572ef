use std::path::Path;

use tera::{Context, Tera};

use crate::error::{EclipsifyError, Result};

/// Render the template at `template_path` against `context`.
///
/// Undefined variables and syntax errors surface as [`EclipsifyError::RenderError`].
pub fn render_template(template_path: &Path, context: &Context) -> Result<String> {
    let content = std::fs::read_to_string(template_path).map_err(|e| EclipsifyError::Io {
        context: format!("reading template {}", template_path.display()),
        source: e,
    })?;

    let name = template_path.display().to_string();
    render_str(&name, &content, context)
}

/// Render an in-memory template. `name` is only used in error messages.
pub fn render_str(name: &str, content: &str, context: &Context) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);

    tera.add_raw_template(name, content)
        .and_then(|_| tera.render(name, context))
        .map_err(|e| EclipsifyError::RenderError {
            file: name.to_string(),
            source: e,
        })
}
