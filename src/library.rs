//! Building the tree of Steam library folders and their installed apps from `libraryfolders.vdf`.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    data::{AppId, InstalledItem, LibraryRoot, LibraryTree},
    error::{Result, SteamDmenuError},
    macros::logs::{debug_fallback_flatpak, debug_path, warn_no_apps},
    manifest::{ManifestReader, ManifestResolver},
    parsers::parse_vdf,
    utils::{expand_home, some_if_dir, some_if_file},
    vdf::{VdfNode, normalize_document},
};

const LIBRARY_FOLDERS_FILE: &str = "libraryfolders.vdf";

/// Default location of `libraryfolders.vdf`, relative to the home directory
pub const DEFAULT_LIBRARY_DOCUMENT: &str = "~/.local/share/Steam/steamapps/libraryfolders.vdf";

pub fn get_steam_flatpak_dir(path_home: &Path) -> PathBuf {
    path_home.join(".var/app/com.valvesoftware.Steam/data/Steam")
}

/// Finds `libraryfolders.vdf` from a path which is either the file itself, a directory
/// containing it, or a Steam directory with it inside of `steamapps/`
#[tracing::instrument(level = "trace")]
pub fn locate_library_document(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let path_dir = some_if_dir(path.to_path_buf())?;

    some_if_file(path_dir.join(LIBRARY_FOLDERS_FILE)).or_else(|| {
        some_if_dir(path_dir.join("steamapps"))
            .and_then(|path_steamapps| some_if_file(path_steamapps.join(LIBRARY_FOLDERS_FILE)))
    })
}

/// Where `libraryfolders.vdf` was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDocument {
    pub path: PathBuf,
    pub is_using_flatpak: bool,
}

/// Finds `libraryfolders.vdf` for the default Steam install, falling back to the flatpak install
/// if the native one doesn't exist
pub fn locate_default_library_document(path_home: &Path) -> Option<LibraryDocument> {
    let path_document = expand_home(DEFAULT_LIBRARY_DOCUMENT, path_home);
    debug_path!("main libraryfolders.vdf", path_document);

    if let Some(path) = some_if_file(path_document) {
        return Some(LibraryDocument {
            path,
            is_using_flatpak: false,
        });
    }

    debug_fallback_flatpak!();

    let path_flatpak_dir = get_steam_flatpak_dir(path_home);
    debug_path!("flatpak Steam directory", path_flatpak_dir);

    locate_library_document(&path_flatpak_dir).map(|path| LibraryDocument {
        path,
        is_using_flatpak: true,
    })
}

/// Reads and parses the `libraryfolders.vdf` at the given path
#[tracing::instrument(level = "trace")]
pub fn read_library_document(path: &Path) -> Result<VdfNode> {
    let file_content = read_to_string(path).map_err(|e| {
        debug!("Could not read {path:?}: {e}");
        SteamDmenuError::Path {
            path: path.to_path_buf(),
            expected: "readable libraryfolders.vdf file",
        }
    })?;

    parse_vdf(&file_content)
}

fn parse_app_id(key: &str, library_id: &str) -> Result<AppId> {
    key.parse().map_err(|_| {
        SteamDmenuError::Format(format!(
            "app ID {key:?} in library {library_id:?} is not an integer"
        ))
    })
}

/// Builds the tree of library folders and the apps installed in each of them.
///
/// Library folders whose path doesn't exist (e.g. an unmounted drive) are skipped. Every listed
/// app must have a readable manifest, otherwise the whole build fails.
#[tracing::instrument(level = "trace", skip_all)]
pub fn build_library_tree<R: ManifestReader>(
    document: &VdfNode,
    resolver: &mut ManifestResolver<R>,
) -> Result<LibraryTree> {
    let folders = document
        .get_node("libraryfolders")
        .ok_or_else(|| SteamDmenuError::FieldMissing {
            field: "libraryfolders",
            context: "library document".to_string(),
        })?;

    let mut roots = IndexMap::new();

    for (library_id, entry) in folders.iter() {
        let Some(entry) = entry.as_node() else {
            debug!("Skipping non-library entry {library_id:?}");
            continue;
        };

        let path = entry
            .get_str("path")
            .ok_or_else(|| SteamDmenuError::FieldMissing {
                field: "path",
                context: format!("library {library_id:?}"),
            })?;

        let Some(path) = some_if_dir(PathBuf::from(path)) else {
            debug!("Skipping library {library_id:?} as its path does not exist: {path:?}");
            continue;
        };

        let mut items = IndexMap::new();

        match entry.get_node("apps") {
            Some(apps) if !apps.is_empty() => {
                for key in apps.keys() {
                    let app_id = parse_app_id(key, library_id)?;
                    let title = resolver.resolve(&path, app_id)?;

                    items.insert(app_id, InstalledItem { app_id, title });
                }
            }
            _ => {
                warn_no_apps!(library_id);
            }
        }

        debug!("Library {library_id:?} at {path:?}: {} apps", items.len());

        roots.insert(
            library_id.to_string(),
            LibraryRoot {
                id: library_id.to_string(),
                path,
                items,
            },
        );
    }

    Ok(LibraryTree { roots })
}

/// Same as [`build_library_tree`], for a document which was assembled elsewhere rather than
/// parsed from a file. The document is normalized first so it has exactly the shape the parser
/// would have given it.
pub fn build_library_tree_from_map<R: ManifestReader>(
    document: &VdfNode,
    resolver: &mut ManifestResolver<R>,
) -> Result<LibraryTree> {
    build_library_tree(&normalize_document(document)?, resolver)
}
