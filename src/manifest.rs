//! Resolving app titles from Steam's `appmanifest_<id>.acf` files.

use std::{
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{
    data::{AppId, NameCache},
    error::{Result, SteamDmenuError},
    parsers::parse_vdf,
    utils::to_ascii_title,
};

/// Where the manifest for `app_id` lives within the given library folder
pub fn get_manifest_path(path_library: &Path, app_id: AppId) -> PathBuf {
    path_library
        .join("steamapps")
        .join(format!("appmanifest_{app_id}.acf"))
}

/// Source of manifest file contents
pub trait ManifestReader {
    fn read_manifest(&self, path: &Path) -> io::Result<String>;
}

/// Reads manifests straight from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FsManifestReader;

impl ManifestReader for FsManifestReader {
    fn read_manifest(&self, path: &Path) -> io::Result<String> {
        read_to_string(path)
    }
}

/// Looks up app titles, parsing each app's manifest at most once per run
#[derive(Debug, Default)]
pub struct ManifestResolver<R = FsManifestReader> {
    reader: R,
    cache: NameCache,
}

impl ManifestResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ManifestReader> ManifestResolver<R> {
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            cache: NameCache::default(),
        }
    }

    /// Titles resolved so far
    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Returns the (ASCII only) title of `app_id`, installed in the library at `path_library`.
    ///
    /// Titles which were already resolved during this run are returned from the cache, even if
    /// they were found in a different library.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn resolve(&mut self, path_library: &Path, app_id: AppId) -> Result<String> {
        if let Some(title) = self.cache.get(app_id) {
            trace!("Title for app {app_id} found in cache: {title:?}");
            return Ok(title.to_owned());
        }

        let path_manifest = get_manifest_path(path_library, app_id);

        let file_content = self
            .reader
            .read_manifest(&path_manifest)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SteamDmenuError::ManifestNotFound {
                    app_id,
                    path: path_manifest.clone(),
                },
                _ => SteamDmenuError::Io(e),
            })?;

        let manifest = parse_vdf(&file_content)?;

        let title = manifest
            .get_node("AppState")
            .and_then(|app_state| app_state.get_str("name"))
            .map(to_ascii_title)
            .ok_or_else(|| SteamDmenuError::FieldMissing {
                field: "AppState.name",
                context: format!("{path_manifest:?}"),
            })?;

        debug!("Resolved app {app_id} to {title:?}");
        self.cache.insert(app_id, title.clone());

        Ok(title)
    }
}
