use std::io::Write;
use std::path::{Path, PathBuf};

use console::style;
use tera::Context;
use tracing::{debug, warn};

use crate::config::MissingTemplatePolicy;
use crate::error::{EclipsifyError, Result};
use crate::manifest::{FileManifest, ManifestEntry};
use crate::render::{build_context, render_template, GenerationContext};
use crate::template::{locate_or_err, SearchPath};

/// One rendered manifest entry, ready to be written.
pub struct RenderedFile {
    pub name: String,
    /// Path relative to the output directory.
    pub relative_path: PathBuf,
    /// Template the content was rendered from.
    pub template_path: PathBuf,
    pub content: String,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Targets written (or, in a dry run, that would be written), in manifest order.
    pub written: Vec<PathBuf>,
    /// Logical names left out because their template was missing.
    pub skipped: Vec<String>,
}

pub struct ProjectFilesGenerator {
    context: GenerationContext,
    manifest: FileManifest,
    policy: MissingTemplatePolicy,
    dry_run: bool,
}

impl ProjectFilesGenerator {
    pub fn new(context: GenerationContext, manifest: FileManifest) -> Self {
        Self {
            context,
            manifest,
            policy: MissingTemplatePolicy::default(),
            dry_run: false,
        }
    }

    pub fn with_policy(mut self, policy: MissingTemplatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Render everything but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Render every manifest entry in order and write it under `output_dir`.
    ///
    /// Each entry is located, rendered and written before the next one is
    /// looked at, so a failure part way leaves the earlier files in place.
    pub fn generate(
        &self,
        search_path: &SearchPath,
        output_dir: &Path,
    ) -> Result<GenerationReport> {
        let context = build_context(&self.context);
        let mut report = GenerationReport {
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        };

        for entry in &self.manifest {
            match self.render_entry(entry, search_path, &context) {
                Ok(file) => {
                    if !self.dry_run {
                        write_atomic(&output_dir.join(&file.relative_path), &file.content)?;
                    }
                    debug!(
                        name = %file.name,
                        template = %file.template_path.display(),
                        "generated {}",
                        file.relative_path.display()
                    );
                    if self.context.verbose > 0 {
                        println!(
                            "  {} {} {}",
                            style("create").green(),
                            file.relative_path.display(),
                            style(format!("({})", file.template_path.display())).dim()
                        );
                    }
                    report.written.push(file.relative_path);
                }
                Err(EclipsifyError::MissingTemplate { name, template, .. })
                    if entry.optional || self.policy == MissingTemplatePolicy::Skip =>
                {
                    warn!(name = %name, template = %template, "template not found, skipping");
                    eprintln!(
                        "{} no template '{}' for {}, skipped",
                        style("warning:").yellow().bold(),
                        template,
                        style(&name).yellow()
                    );
                    report.skipped.push(name);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    /// Locate and render a single entry without writing it.
    pub fn render_entry(
        &self,
        entry: &ManifestEntry,
        search_path: &SearchPath,
        context: &Context,
    ) -> Result<RenderedFile> {
        let template_path = locate_or_err(search_path, &entry.name, &entry.template)?;
        debug!(name = %entry.name, template = %template_path.display(), "rendering");
        let content = render_template(&template_path, context)?;

        Ok(RenderedFile {
            name: entry.name.clone(),
            relative_path: entry.target(),
            template_path,
            content,
        })
    }
}

/// Write `content` to a temporary file next to `dest` and rename it into place.
///
/// The result gets the permissions of the file it replaces, or those of a
/// freshly created file (0666 less the umask) when there is none.
fn write_atomic(dest: &Path, content: &str) -> Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| EclipsifyError::Io {
        context: format!("creating directory {}", parent.display()),
        source: e,
    })?;

    let io_err = |e: std::io::Error| EclipsifyError::Io {
        context: format!("writing {}", dest.display()),
        source: e,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".eclipsify");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(parent).map_err(io_err)?;
    if let Ok(existing) = std::fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(io_err)?;
    }
    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    tmp.persist(dest).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn context(out: &Path) -> GenerationContext {
        GenerationContext::new("my_pkg", "/src/my_pkg", "/build/my_pkg", out, "linux", 0)
    }

    fn manifest(s: &str) -> FileManifest {
        FileManifest::parse(s, Path::new("files.toml")).unwrap()
    }

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const TWO_FILES: &str = r#"
[[file]]
name = ".project"
template = "project.xml"

[[file]]
name = "language.settings.xml"
template = "language.settings.xml"
target = ".settings/language.settings.xml"
"#;

    #[test]
    fn writes_rendered_files_to_targets() {
        let tmp = tempfile::tempdir().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "project.xml", "<name>{{ package }}</name>");
        write(&templates, "language.settings.xml", "{{ platform }}");
        let out = tmp.path().join("out");

        let generator = ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES));
        let report = generator
            .generate(&SearchPath::new(vec![templates]), &out)
            .unwrap();

        assert_eq!(
            report.written,
            vec![
                PathBuf::from(".project"),
                PathBuf::from(".settings/language.settings.xml")
            ]
        );
        assert!(report.skipped.is_empty());
        assert_eq!(
            fs::read_to_string(out.join(".project")).unwrap(),
            "<name>my_pkg</name>"
        );
        assert_eq!(
            fs::read_to_string(out.join(".settings/language.settings.xml")).unwrap(),
            "linux"
        );
    }

    #[test]
    fn empty_manifest_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        let generator = ProjectFilesGenerator::new(context(&out), FileManifest::default());
        let report = generator.generate(&SearchPath::default(), &out).unwrap();

        assert!(report.written.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn missing_template_fails_then_succeeds_once_added() {
        let tmp = tempfile::tempdir().unwrap();
        let user = tmp.path().join("user");
        let bundled = tmp.path().join("bundled");
        write(&bundled, "project.xml", "p");
        let out = tmp.path().join("out");
        let search_path = SearchPath::new(vec![user.clone(), bundled]);

        let generator = ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES));
        let err = generator.generate(&search_path, &out).unwrap_err();
        match err {
            EclipsifyError::MissingTemplate { name, searched, .. } => {
                assert_eq!(name, "language.settings.xml");
                assert_eq!(searched, search_path.dirs());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        write(&user, "language.settings.xml", "l");
        let report = generator.generate(&search_path, &out).unwrap();
        assert_eq!(report.written.len(), 2);
    }

    #[test]
    fn skip_policy_leaves_out_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "language.settings.xml", "l");
        let out = tmp.path().join("out");

        let generator = ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES))
            .with_policy(MissingTemplatePolicy::Skip);
        let report = generator
            .generate(&SearchPath::new(vec![templates]), &out)
            .unwrap();

        assert_eq!(report.skipped, vec![".project".to_string()]);
        assert_eq!(
            report.written,
            vec![PathBuf::from(".settings/language.settings.xml")]
        );
        assert!(!out.join(".project").exists());
    }

    #[test]
    fn optional_entry_is_skipped_under_fail_policy() {
        let tmp = tempfile::tempdir().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "project.xml", "p");
        let out = tmp.path().join("out");
        let manifest = manifest(
            r#"
[[file]]
name = ".project"
template = "project.xml"

[[file]]
name = ".extra"
template = "extra.xml"
optional = true
"#,
        );

        let generator = ProjectFilesGenerator::new(context(&out), manifest);
        let report = generator
            .generate(&SearchPath::new(vec![templates]), &out)
            .unwrap();
        assert_eq!(report.skipped, vec![".extra".to_string()]);
        assert_eq!(report.written, vec![PathBuf::from(".project")]);
    }

    #[test]
    fn render_error_is_fatal_even_when_skipping() {
        let tmp = tempfile::tempdir().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "project.xml", "{{ undefined_var }}");
        write(&templates, "language.settings.xml", "l");
        let out = tmp.path().join("out");

        let generator = ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES))
            .with_policy(MissingTemplatePolicy::Skip);
        let result = generator.generate(&SearchPath::new(vec![templates]), &out);
        assert!(matches!(result, Err(EclipsifyError::RenderError { .. })));
    }

    #[test]
    fn user_template_shadows_bundled() {
        let tmp = tempfile::tempdir().unwrap();
        let user = tmp.path().join("user");
        let bundled = tmp.path().join("bundled");
        write(&user, "project.xml", "user {{ package }}");
        write(&bundled, "project.xml", "bundled {{ package }}");
        write(&bundled, "language.settings.xml", "l");
        let out = tmp.path().join("out");

        let generator = ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES));
        generator
            .generate(&SearchPath::new(vec![user, bundled]), &out)
            .unwrap();
        assert_eq!(
            fs::read_to_string(out.join(".project")).unwrap(),
            "user my_pkg"
        );
    }

    #[test]
    fn generation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "project.xml", "<name>{{ package }}</name>\n");
        write(&templates, "language.settings.xml", "{{ build_dir }}\n");
        let out = tmp.path().join("out");
        let search_path = SearchPath::new(vec![templates]);
        let generator = ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES));

        generator.generate(&search_path, &out).unwrap();
        let first_project = fs::read(out.join(".project")).unwrap();
        let first_settings = fs::read(out.join(".settings/language.settings.xml")).unwrap();

        generator.generate(&search_path, &out).unwrap();
        assert_eq!(fs::read(out.join(".project")).unwrap(), first_project);
        assert_eq!(
            fs::read(out.join(".settings/language.settings.xml")).unwrap(),
            first_settings
        );
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "project.xml", "p");
        write(&templates, "language.settings.xml", "l");
        let out = tmp.path().join("out");

        let generator =
            ProjectFilesGenerator::new(context(&out), manifest(TWO_FILES)).dry_run(true);
        let report = generator
            .generate(&SearchPath::new(vec![templates]), &out)
            .unwrap();
        assert_eq!(report.written.len(), 2);
        assert!(!out.exists());
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("nested/dir/file.txt");
        write_atomic(&dest, "first").unwrap();
        write_atomic(&dest, "second").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");

        let leftovers: Vec<_> = fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_mode_of_replaced_file() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join(".project");
        fs::write(&dest, "old").unwrap();
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&dest, "new").unwrap();
        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        fs::set_permissions(&dest, fs::Permissions::from_mode(0o640)).unwrap();
        write_atomic(&dest, "newer").unwrap();
        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_new_file_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let plain = tmp.path().join("plain");
        fs::write(&plain, "x").unwrap();
        let dest = tmp.path().join(".cproject");
        write_atomic(&dest, "x").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&dest), mode(&plain));
    }
}
