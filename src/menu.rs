//! Rendering the library tree for the selector, and as launcher scripts.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use cfg_if::cfg_if;
use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::{
    data::{AppId, ExclusionSet, LibraryTree, NameCache},
    error::{Result, SteamDmenuError},
    launch::{SteamInstall, get_steam_launch_command},
    utils::command_line,
};

/// One selector line per installed app that isn't excluded, e.g. `play 440: Team Fortress 2`
#[tracing::instrument(level = "trace", skip(tree, exclusions))]
pub fn render_menu_lines(
    tree: &LibraryTree,
    exclusions: &ExclusionSet,
    prefix: &str,
) -> Vec<String> {
    tree.items()
        .filter(|item| !exclusions.contains(item.app_id))
        .map(|item| format!("{prefix}{}: {}", item.app_id, item.title))
        .collect()
}

/// The text fed to the selector, one line per app
pub fn render_menu(tree: &LibraryTree, exclusions: &ExclusionSet, prefix: &str) -> String {
    render_menu_lines(tree, exclusions, prefix).iter().join("\n")
}

/// Contents of a launcher script for `app_id`
pub fn render_script(app_id: AppId, install: SteamInstall) -> String {
    format!(
        "#!/bin/bash\n{}\n",
        command_line(&get_steam_launch_command(app_id, install))
    )
}

cfg_if! {
    if #[cfg(unix)] {
        /// Adds execute permissions on top of whatever permissions the file already has
        fn make_executable(path: &Path) -> Result<()> {
            use std::os::unix::fs::PermissionsExt;

            let mut permissions = fs::metadata(path)?.permissions();
            permissions.set_mode(permissions.mode() | 0o111);
            fs::set_permissions(path, permissions)?;

            Ok(())
        }
    } else {
        fn make_executable(path: &Path) -> Result<()> {
            trace!("Executable permissions are not supported on this platform: {path:?}");
            Ok(())
        }
    }
}

/// `<prefix><title>`, if that names a plain file inside the output directory
fn get_script_file_name(prefix: &str, title: &str) -> Option<String> {
    let file_name = format!("{prefix}{title}");

    match file_name.as_str() {
        "" | "." | ".." => None,
        name if name.contains('/') => None,
        _ => Some(file_name),
    }
}

/// Writes one executable launcher script per resolved app into `path_output_dir`, named
/// `<prefix><title>`. Existing files are overwritten, and titles which can't be used as a file
/// name (e.g. `Fate/Samurai Remnant`) are skipped.
///
/// Scripts are generated for every title resolved during this run (see [`NameCache`]), not only
/// for apps in a particular library tree. Returns the paths of the written scripts.
#[tracing::instrument(level = "trace", skip(cache, exclusions))]
pub fn write_launch_scripts(
    cache: &NameCache,
    exclusions: &ExclusionSet,
    path_output_dir: &Path,
    prefix: &str,
    install: SteamInstall,
) -> Result<Vec<PathBuf>> {
    if !path_output_dir.is_dir() {
        return Err(SteamDmenuError::Path {
            path: path_output_dir.to_path_buf(),
            expected: "directory",
        });
    }

    let mut written = vec![];

    for (app_id, title) in cache.iter() {
        if exclusions.contains(app_id) {
            trace!("Not writing script for excluded app {app_id}");
            continue;
        }

        let Some(file_name) = get_script_file_name(prefix, title) else {
            warn!("Not writing script for app {app_id}, {title:?} can't be used as a file name");
            continue;
        };

        let path_script = path_output_dir.join(file_name);

        File::create(&path_script)?.write_all(render_script(app_id, install).as_bytes())?;
        make_executable(&path_script)?;

        debug!("Wrote launch script for app {app_id} to {path_script:?}");
        written.push(path_script);
    }

    Ok(written)
}
