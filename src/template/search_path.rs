use std::path::{Path, PathBuf};

/// Name of the per-user directory under `$HOME`.
pub const USER_DIR: &str = ".eclipsify";

/// Environment variable overriding the location of the bundled templates.
pub const TEMPLATES_DIR_ENV: &str = "ECLIPSIFY_TEMPLATES_DIR";

/// Ordered list of template directories. Earlier entries shadow later ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

/// The two template roots the default chain is derived from.
#[derive(Debug, Clone)]
pub struct TemplateRoots {
    /// Templates shipped with the tool.
    pub bundled: PathBuf,
    /// Per-user templates, `~/.eclipsify/templates`. `None` when there is no home directory.
    pub user: Option<PathBuf>,
}

impl TemplateRoots {
    /// Roots for the current environment.
    pub fn discover() -> Self {
        Self {
            bundled: bundled_templates_dir(),
            user: user_templates_dir(),
        }
    }

    /// Default chain in shadowing order: user-platform, user, platform, bundled.
    pub fn default_chain(&self, platform: &str) -> Vec<PathBuf> {
        let mut chain = Vec::with_capacity(4);
        if let Some(user) = &self.user {
            chain.push(user.join(platform));
            chain.push(user.clone());
        }
        chain.push(self.bundled.join(platform));
        chain.push(self.bundled.clone());
        chain
    }
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Build a search path from a `-T` value.
    ///
    /// The value is a colon-separated list of directories prepended to the
    /// default chain. A leading `=` drops the default chain entirely. Empty
    /// segments are ignored.
    pub fn from_spec(spec: &str, roots: &TemplateRoots, platform: &str) -> Self {
        let (exclusive, list) = match spec.strip_prefix('=') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let mut dirs: Vec<PathBuf> = list
            .split(':')
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        if !exclusive {
            dirs.extend(roots.default_chain(platform));
        }

        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

fn user_templates_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_DIR).join("templates"))
}

fn bundled_templates_dir() -> PathBuf {
    match std::env::var_os(TEMPLATES_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => installed_templates_dir(std::env::current_exe().ok().as_deref()),
    }
}

/// Templates installed alongside the binary: `<bin>/templates`, then
/// `<bin>/../share/eclipsify/templates`. Falls back to the source tree the
/// binary was built from.
fn installed_templates_dir(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .into_iter()
        .flat_map(|bin| {
            [
                bin.join("templates"),
                bin.join("..").join("share").join("eclipsify").join("templates"),
            ]
        })
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
}
