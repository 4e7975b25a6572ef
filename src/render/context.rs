use std::path::{Path, PathBuf};

use tera::Context;

/// Package metadata every template is rendered against.
///
/// Built once per run and only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub package: String,
    pub src_dir: PathBuf,
    pub build_dir: PathBuf,
    pub output_dir: PathBuf,
    pub platform: String,
    pub verbose: u8,
}

impl GenerationContext {
    pub fn new(
        package: impl Into<String>,
        src_dir: impl AsRef<Path>,
        build_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        platform: impl Into<String>,
        verbose: u8,
    ) -> Self {
        Self {
            package: package.into(),
            src_dir: src_dir.as_ref().to_path_buf(),
            build_dir: build_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            platform: platform.into(),
            verbose,
        }
    }
}

/// Variables visible to templates.
pub fn build_context(ctx: &GenerationContext) -> Context {
    let mut context = Context::new();
    context.insert("package", &ctx.package);
    context.insert("src_dir", &ctx.src_dir.display().to_string());
    context.insert("build_dir", &ctx.build_dir.display().to_string());
    context.insert("output_dir", &ctx.output_dir.display().to_string());
    context.insert("platform", &ctx.platform);
    context.insert("verbose", &ctx.verbose);
    context
}
