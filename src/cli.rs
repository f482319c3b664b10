use std::path::PathBuf;

use clap::Parser;

use steam_dmenu::library::DEFAULT_LIBRARY_DOCUMENT;

/// Command-line arguments accepted by the `steam-dmenu` binary.
#[derive(Parser, Debug)]
#[command(
    name = "steam-dmenu",
    version,
    about = "Launch installed Steam games using dmenu"
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long,
        value_name = "COMMAND",
        env = "STEAM_DMENU_COMMAND",
        default_value = "dmenu -i",
        help = "Selector command, split on whitespace"
    )]
    pub(crate) dmenu: String,
    #[arg(
        short,
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2),
        help = "0: launch a game, 1: only generate scripts, 2: generate scripts then launch"
    )]
    pub(crate) mode: u8,
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "STEAM_DMENU_LIBRARY",
        help = format!(
            "libraryfolders.vdf, or a directory containing it (when omitted: {DEFAULT_LIBRARY_DOCUMENT}, falling back to flatpak Steam)"
        )
    )]
    pub(crate) library: Option<String>,
    #[arg(
        short,
        long = "blocked",
        value_name = "IDS",
        num_args = 1..,
        help = "App IDs to hide, separated by commas or spaces, replacing the built-in list of Proton, Steam runtimes and redistributables"
    )]
    pub(crate) blocked: Option<Vec<String>>,
    #[arg(
        short,
        long,
        value_name = "TEXT",
        default_value = "play ",
        help = "Prefix for menu lines and script names"
    )]
    pub(crate) prefix: String,
    #[arg(
        short,
        long,
        value_name = "DIR",
        required_if_eq_any([("mode", "1"), ("mode", "2")]),
        help = "Directory to write launcher scripts into (required for modes 1 and 2)"
    )]
    pub(crate) output: Option<String>,
}

pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

impl CliArgs {
    pub(crate) fn output_path(&self, path_home: &std::path::Path) -> Option<PathBuf> {
        self.output
            .as_deref()
            .map(|output| steam_dmenu::utils::expand_home(output, path_home))
    }
}
