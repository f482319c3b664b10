use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use indexmap::IndexMap;

use crate::error::{Result, SteamDmenuError};

/// Steam's numeric identifier for an app (game, tool, runtime, ...)
pub type AppId = u32;

/// An app installed in a Steam library, with the title read from its manifest
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstalledItem {
    pub app_id: AppId,
    pub title: String,
}

/// One of the library folders listed in `libraryfolders.vdf`, along with its installed apps
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LibraryRoot {
    pub id: String,
    pub path: PathBuf,
    pub items: IndexMap<AppId, InstalledItem>,
}

/// All existing library folders, in the order they are listed in `libraryfolders.vdf`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LibraryTree {
    pub roots: IndexMap<String, LibraryRoot>,
}

impl LibraryTree {
    /// Every installed item across all roots, in library then manifest order
    pub fn items(&self) -> impl Iterator<Item = &InstalledItem> {
        self.roots.values().flat_map(|root| root.items.values())
    }
}

/// App titles resolved so far in this run, in the order they were first resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCache {
    titles: IndexMap<AppId, String>,
}

impl NameCache {
    pub fn get(&self, app_id: AppId) -> Option<&str> {
        self.titles.get(&app_id).map(String::as_str)
    }

    pub fn insert(&mut self, app_id: AppId, title: String) {
        self.titles.insert(app_id, title);
    }

    pub fn iter(&self) -> impl Iterator<Item = (AppId, &str)> {
        self.titles.iter().map(|(id, title)| (*id, title.as_str()))
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Steamworks Common Redistributables
const BLOCKED_STEAMWORKS: [AppId; 1] = [228980];
/// Proton versions
const BLOCKED_PROTON: [AppId; 9] = [
    2348590, 1887720, 858280, 961940, 1054830, 1113280, 1245040, 1493710, 1580130,
];
/// Steam Linux Runtime, plus the Soldier and Sniper variants
const BLOCKED_RUNTIMES: [AppId; 3] = [1070560, 1391110, 1628350];
/// Proton EasyAntiCheat Runtime
const BLOCKED_EAC_RUNTIME: [AppId; 1] = [1826330];

/// App IDs which are hidden from the menu and from generated scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<AppId>);

impl ExclusionSet {
    /// An exclusion set which hides nothing
    pub fn empty() -> Self {
        Self(HashSet::new())
    }

    pub fn contains(&self, app_id: AppId) -> bool {
        self.0.contains(&app_id)
    }

    /// Parses user given IDs, where each argument may itself hold several IDs separated by
    /// commas and/or whitespace (e.g. `["1,2", "3 4"]`)
    pub fn parse<S: AsRef<str>>(args: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut ids = HashSet::new();

        for arg in args {
            for id in arg
                .as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
            {
                ids.insert(id.parse::<AppId>().map_err(|_| {
                    SteamDmenuError::Format(format!("blocked app ID {id:?} is not an integer"))
                })?);
            }
        }

        Ok(Self(ids))
    }
}

/// Tools and runtimes which are installed like games but can't be played
impl Default for ExclusionSet {
    fn default() -> Self {
        BLOCKED_STEAMWORKS
            .into_iter()
            .chain(BLOCKED_PROTON)
            .chain(BLOCKED_RUNTIMES)
            .chain(BLOCKED_EAC_RUNTIME)
            .collect()
    }
}

impl FromIterator<AppId> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = AppId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of asking the user to pick a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(AppId),
    /// The selector was cancelled, failed, or returned something which isn't an app ID
    Aborted,
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Selection::Chosen(app_id) => write!(f, "app {app_id}"),
            Selection::Aborted => write!(f, "no selection"),
        }
    }
}
