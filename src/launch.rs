//! Starting games through Steam.

use std::{fmt::Display, process::Command};

use cfg_if::cfg_if;
use tracing::debug;

use crate::{
    data::AppId,
    error::Result,
    utils::{get_launch_command, get_launch_command_flatpak},
};

const STEAM_FLATPAK_APP: &str = "com.valvesoftware.Steam";

cfg_if! {
    if #[cfg(target_os = "macos")] {
        const URI_OPENER: &str = "open";
    } else {
        const URI_OPENER: &str = "xdg-open";
    }
}

/// How Steam is installed, which decides how generated scripts call it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SteamInstall {
    #[default]
    Native,
    Flatpak,
}

/// Command which starts the given app through Steam's own command line entry point
pub fn get_steam_launch_command(app_id: impl Display, install: SteamInstall) -> Command {
    let game_run_arg = format!("steam://rungameid/{app_id}");
    let args = [game_run_arg.as_str()];

    match install {
        SteamInstall::Native => get_launch_command("steam", args, []),
        SteamInstall::Flatpak => get_launch_command_flatpak(STEAM_FLATPAK_APP, [], args, []),
    }
}

/// Deep link which asks a running Steam client to start the given app
pub fn get_steam_run_uri(app_id: AppId) -> String {
    format!("steam://run/{app_id}")
}

/// Something which can start a game
pub trait GameLauncher {
    fn launch(&self, app_id: AppId) -> Result<()>;
}

/// Hands the `steam://run/<id>` link over to the desktop's URI handler, without waiting for the
/// game (or Steam) to start
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenHandler;

impl GameLauncher for OpenHandler {
    #[tracing::instrument(level = "trace")]
    fn launch(&self, app_id: AppId) -> Result<()> {
        let uri = get_steam_run_uri(app_id);
        debug!("Opening {uri} with {URI_OPENER}");

        get_launch_command(URI_OPENER, [uri.as_str()], []).spawn()?;

        Ok(())
    }
}
