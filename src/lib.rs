pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod platform;
pub mod render;
pub mod template;

use std::path::PathBuf;

use console::style;
use tracing::debug;

use crate::config::{load_user_config, MissingTemplatePolicy, UserConfig};
use crate::error::Result;
use crate::generate::{GenerationReport, ProjectFilesGenerator};
use crate::manifest::FileManifest;
use crate::render::GenerationContext;
use crate::template::{shadowed, SearchPath, TemplateRoots};

pub struct GenerateOptions {
    pub package: String,
    pub src_dir: PathBuf,
    pub out_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Raw `-T` value.
    pub templates: Option<String>,
    pub platform: Option<String>,
    pub verbose: u8,
    pub skip_missing: bool,
    pub dry_run: bool,
}

/// Everything a run needs, resolved once up front.
pub struct Invocation {
    pub context: GenerationContext,
    pub search_path: SearchPath,
    pub policy: MissingTemplatePolicy,
    pub dry_run: bool,
}

impl Invocation {
    /// Merge command line options over user config. Flags win over config.
    pub fn from_options(
        options: GenerateOptions,
        config: Option<&UserConfig>,
        roots: &TemplateRoots,
    ) -> Self {
        let platform = options
            .platform
            .or_else(|| config.and_then(|c| c.platform.clone()))
            .unwrap_or_else(|| platform::host_platform().to_string());

        let templates = options
            .templates
            .or_else(|| config.and_then(|c| c.templates.clone()))
            .unwrap_or_default();

        let policy = if options.skip_missing {
            MissingTemplatePolicy::Skip
        } else {
            config.map(|c| c.missing_templates).unwrap_or_default()
        };

        let search_path = SearchPath::from_spec(&templates, roots, &platform);
        let context = GenerationContext::new(
            options.package,
            options.src_dir,
            options.build_dir,
            options.out_dir,
            platform,
            options.verbose,
        );

        Self {
            context,
            search_path,
            policy,
            dry_run: options.dry_run,
        }
    }
}

/// Resolve options against the user config and the template directories on this machine.
pub fn prepare(options: GenerateOptions) -> Result<Invocation> {
    let config = load_user_config()?;
    let roots = TemplateRoots::discover();
    let invocation = Invocation::from_options(options, config.as_ref(), &roots);
    debug!(search_path = ?invocation.search_path.dirs(), "resolved template search path");
    Ok(invocation)
}

pub fn print_banner(context: &GenerationContext) {
    println!(
        "eclipsify package {} for platform {}",
        style(&context.package).cyan().bold(),
        style(&context.platform).cyan()
    );
    println!("----------");
}

/// Load the manifest from the search path and generate every file it lists.
pub fn generate(invocation: &Invocation) -> Result<GenerationReport> {
    let manifest = FileManifest::load(&invocation.search_path)?;
    let generator = ProjectFilesGenerator::new(invocation.context.clone(), manifest)
        .with_policy(invocation.policy)
        .dry_run(invocation.dry_run);

    generator.generate(&invocation.search_path, &invocation.context.output_dir)
}

/// Where a manifest entry's template resolves to, and what it shadows.
pub struct TemplateResolution {
    pub name: String,
    pub template: String,
    pub target: PathBuf,
    /// Directories holding the template, winner first.
    pub candidates: Vec<PathBuf>,
}

impl TemplateResolution {
    pub fn winner(&self) -> Option<&PathBuf> {
        self.candidates.first()
    }
}

/// Resolve every manifest entry without rendering anything.
pub fn resolve_templates(invocation: &Invocation) -> Result<Vec<TemplateResolution>> {
    let manifest = FileManifest::load(&invocation.search_path)?;
    Ok(manifest
        .iter()
        .map(|entry| TemplateResolution {
            name: entry.name.clone(),
            template: entry.template.clone(),
            target: entry.target(),
            candidates: shadowed(&invocation.search_path, &entry.template)
                .into_iter()
                .map(|dir| dir.to_path_buf())
                .collect(),
        })
        .collect())
}
