use std::path::{Path, PathBuf};

use crate::error::{Result, SteamDmenuError};

/// Returns an Option containing the given `PathBuf`, if the `PathBuf` points to an actual file
pub fn some_if_file(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Returns an Option containing the given `PathBuf`, if the `PathBuf` points to an actual directory
pub fn some_if_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}

/// The current user's home directory
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| SteamDmenuError::Path {
        path: PathBuf::from("~"),
        expected: "home directory",
    })
}

/// Replaces a leading `~` or `$HOME` in the given path with `path_home`
///
/// e.g. `$HOME/.steam` with a home of `/home/u` becomes `/home/u/.steam`. Only a whole leading
/// component is replaced, so `~user/games` and `$HOMEDIR` are left alone.
pub fn expand_home(path: impl AsRef<str>, path_home: &Path) -> PathBuf {
    let path = path.as_ref();

    for token in ["~", "$HOME"] {
        if let Some(rest) = path.strip_prefix(token) {
            if rest.is_empty() {
                return path_home.to_path_buf();
            }
            if let Some(rest) = rest.strip_prefix('/') {
                return path_home.join(rest);
            }
        }
    }

    PathBuf::from(path)
}
