/// Identifier of the host platform, used to pick platform template subdirectories.
///
/// Uses the conventional short names (`linux`, `darwin`, `win32`) so existing
/// template trees keep working; any other OS is reported by its Rust name.
pub fn host_platform() -> &'static str {
    platform_name(std::env::consts::OS)
}

fn platform_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}
