#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

fn format_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "(empty search path)".to_string();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error, Diagnostic)]
pub enum EclipsifyError {
    #[error("Template '{template}' for '{name}' not found in: {}", format_dirs(.searched))]
    #[diagnostic(help(
        "Add the template to one of the searched directories, or pass --skip-missing"
    ))]
    MissingTemplate {
        name: String,
        template: String,
        searched: Vec<PathBuf>,
    },

    #[error("Manifest '{file}' not found in: {}", format_dirs(.searched))]
    #[diagnostic(help("The templates directory must contain a files.toml manifest"))]
    ManifestNotFound {
        file: String,
        searched: Vec<PathBuf>,
    },

    #[error("Failed to parse manifest {path}")]
    #[diagnostic(help("Check the TOML syntax of the [[file]] entries"))]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid target '{target}' for '{name}': {reason}")]
    InvalidTarget {
        name: String,
        target: PathBuf,
        reason: String,
    },

    #[error("Invalid template name '{template}' for '{name}': {reason}")]
    #[diagnostic(help("Template names are looked up relative to each search directory"))]
    InvalidTemplate {
        name: String,
        template: String,
        reason: String,
    },

    #[error("Template rendering failed: {file}")]
    #[diagnostic(help("Check your Tera template syntax and the variables it uses"))]
    RenderError {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to parse user config {path}")]
    #[diagnostic(help("Check the TOML syntax in ~/.eclipsify/config.toml"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EclipsifyError>;
