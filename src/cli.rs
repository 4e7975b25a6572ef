use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use eclipsify::GenerateOptions;

#[derive(Parser, Debug)]
#[command(
    name = "eclipsify",
    about = "Generate Eclipse project files for a package",
    long_about = "Renders the project files listed in the templates manifest into OUT_DIR.\n\
                  Templates are searched in the -T directories, then ~/.eclipsify/templates/<platform>,\n\
                  ~/.eclipsify/templates, the bundled templates/<platform> and finally templates/.",
    version
)]
pub struct Cli {
    /// Verbosity level (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Template search path prefix, colon separated. A leading '=' drops the default directories
    #[arg(short = 'T', long, value_name = "DIRS")]
    pub templates: Option<String>,

    /// Platform used to pick template subdirectories (defaults to the host platform)
    #[arg(long)]
    pub platform: Option<String>,

    /// Skip files whose template cannot be found instead of failing
    #[arg(long)]
    pub skip_missing: bool,

    /// Render everything but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Show which directory every template resolves to, then exit
    #[arg(long)]
    pub list: bool,

    /// Name of the package to generate a project for
    pub package: String,

    /// Source directory
    pub src_dir: PathBuf,

    /// Output directory, where the Eclipse project is written
    pub out_dir: PathBuf,

    /// Build directory of the package
    pub build_dir: PathBuf,
}

impl Cli {
    pub fn into_options(self) -> GenerateOptions {
        GenerateOptions {
            package: self.package,
            src_dir: self.src_dir,
            out_dir: self.out_dir,
            build_dir: self.build_dir,
            templates: self.templates,
            platform: self.platform,
            verbose: self.verbose,
            skip_missing: self.skip_missing,
            dry_run: self.dry_run,
        }
    }
}

/// Split a glued `-T=value` into `-T` and `=value`.
///
/// clap would otherwise eat the `=` as a separator, losing the marker that
/// makes the path list exclusive.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    for arg in args {
        match arg.to_str().and_then(|s| s.strip_prefix("-T")) {
            Some(rest) if rest.starts_with('=') => {
                out.push(OsString::from("-T"));
                out.push(OsString::from(rest));
            }
            _ => out.push(arg),
        }
    }
    out
}
