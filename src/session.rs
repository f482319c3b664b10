//! A single run: reading the libraries, then generating scripts and/or launching a game.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    data::{ExclusionSet, LibraryTree, NameCache, Selection},
    error::{Result, SteamDmenuError},
    launch::{GameLauncher, SteamInstall},
    library::{build_library_tree, read_library_document},
    manifest::{FsManifestReader, ManifestReader, ManifestResolver},
    menu::{render_menu_lines, write_launch_scripts},
    selector::Selector,
};

/// What a run should do once the libraries have been read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Show the selector and launch the chosen game
    #[default]
    Launch,
    /// Only write launcher scripts
    GenerateScripts,
    /// Write launcher scripts, then show the selector and launch the chosen game
    GenerateScriptsAndLaunch,
}

impl Mode {
    pub fn generates_scripts(self) -> bool {
        matches!(self, Mode::GenerateScripts | Mode::GenerateScriptsAndLaunch)
    }

    pub fn launches(self) -> bool {
        matches!(self, Mode::Launch | Mode::GenerateScriptsAndLaunch)
    }
}

impl TryFrom<u8> for Mode {
    type Error = SteamDmenuError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Mode::Launch),
            1 => Ok(Mode::GenerateScripts),
            2 => Ok(Mode::GenerateScriptsAndLaunch),
            _ => Err(SteamDmenuError::Format(format!(
                "mode must be 0, 1 or 2, got {value}"
            ))),
        }
    }
}

/// State shared by every step of a run: the title cache, the excluded apps and the menu prefix
#[derive(Debug)]
pub struct Session<R = FsManifestReader> {
    resolver: ManifestResolver<R>,
    exclusions: ExclusionSet,
    prefix: String,
    install: SteamInstall,
}

impl Session {
    pub fn new(exclusions: ExclusionSet, prefix: impl Into<String>) -> Self {
        Self::with_resolver(ManifestResolver::new(), exclusions, prefix)
    }
}

impl<R: ManifestReader> Session<R> {
    pub fn with_resolver(
        resolver: ManifestResolver<R>,
        exclusions: ExclusionSet,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            exclusions,
            prefix: prefix.into(),
            install: SteamInstall::default(),
        }
    }

    pub fn with_install(mut self, install: SteamInstall) -> Self {
        self.install = install;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn cache(&self) -> &NameCache {
        self.resolver.cache()
    }

    /// Reads `libraryfolders.vdf` and every installed app's manifest
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn load_library_tree(&mut self, path_document: &Path) -> Result<LibraryTree> {
        let document = read_library_document(path_document)?;
        let tree = build_library_tree(&document, &mut self.resolver)?;

        debug!(
            "Found {} libraries with {} apps",
            tree.roots.len(),
            tree.items().count()
        );

        Ok(tree)
    }

    pub fn menu_lines(&self, tree: &LibraryTree) -> Vec<String> {
        render_menu_lines(tree, &self.exclusions, &self.prefix)
    }

    /// Writes launcher scripts for every app resolved so far
    pub fn write_scripts(&self, path_output_dir: &Path) -> Result<Vec<PathBuf>> {
        let written = write_launch_scripts(
            self.resolver.cache(),
            &self.exclusions,
            path_output_dir,
            &self.prefix,
            self.install,
        )?;

        info!("Wrote {} launch scripts to {path_output_dir:?}", written.len());

        Ok(written)
    }

    /// Asks the user to pick one of the apps in `tree`, then launches it. Nothing is launched if
    /// the selection was aborted.
    #[tracing::instrument(level = "trace", skip(self, tree, launcher))]
    pub fn select_and_launch(
        &self,
        tree: &LibraryTree,
        selector: &Selector,
        launcher: &impl GameLauncher,
    ) -> Result<Selection> {
        let selection = selector.select(&self.menu_lines(tree))?;

        if let Selection::Chosen(app_id) = selection {
            launcher.launch(app_id)?;
        }

        Ok(selection)
    }
}
