//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace files.
///
/// `/host` is the cwd of the last focused terminal (or where Zellij was
/// started), which is normally the user's home, so this usually resolves to
/// `~/.local/share/zellij/medsimplifier` on the host.
///
/// ```
/// use medsimplifier::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/medsimplifier"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/medsimplifier")
}

/// Maps a leading `~` onto the sandbox host mount. Other paths pass through.
///
/// ```
/// use medsimplifier::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
