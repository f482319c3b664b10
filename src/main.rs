mod cli;

use std::{
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use steam_dmenu::{
    data::{ExclusionSet, Selection},
    error::SteamDmenuError,
    launch::{GameLauncher, OpenHandler, SteamInstall},
    library::{
        LibraryDocument, get_steam_flatpak_dir, locate_default_library_document,
        locate_library_document,
    },
    selector::Selector,
    session::{Mode, Session},
    utils::{expand_home, home_dir},
};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{CliArgs, parse_cli};

const MISSING_LIBRARY_MESSAGE: &str =
    "Path does not exist or does not contain the libraryfolders.vdf!";
const INVALID_OUTPUT_MESSAGE: &str = "Path does not exist or is not a directory!";

// NOTE: logs go to stderr so they never end up mixed into the selector's input, e.g.
// `RUST_LOG=debug steam-dmenu 2> logs.txt`
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .without_time()
                .with_line_number(true)
                .with_writer(std::io::stderr)
                // Don't output colours for logs not being printed to a terminal
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

fn find_library_document(args: &CliArgs, path_home: &Path) -> Option<LibraryDocument> {
    let Some(library) = &args.library else {
        return locate_default_library_document(path_home);
    };

    let path = locate_library_document(&expand_home(library, path_home))?;
    let is_using_flatpak = path.starts_with(get_steam_flatpak_dir(path_home));

    Some(LibraryDocument {
        path,
        is_using_flatpak,
    })
}

/// Runs the given mode, printing diagnostics for a missing library document or output directory
/// to `out`
fn run(
    args: &CliArgs,
    path_home: &Path,
    launcher: &impl GameLauncher,
    out: &mut impl Write,
) -> Result<()> {
    let mode = Mode::try_from(args.mode)?;

    let Some(library_document) = find_library_document(args, path_home) else {
        writeln!(out, "{MISSING_LIBRARY_MESSAGE}")?;
        return Ok(());
    };
    debug!("Using library document {library_document:?}");

    let exclusions = match &args.blocked {
        Some(blocked) => ExclusionSet::parse(blocked).context("Invalid --blocked app IDs")?,
        None => ExclusionSet::default(),
    };

    let install = if library_document.is_using_flatpak {
        SteamInstall::Flatpak
    } else {
        SteamInstall::Native
    };

    let mut session = Session::new(exclusions, args.prefix.as_str()).with_install(install);

    let tree = match session.load_library_tree(&library_document.path) {
        Ok(tree) => tree,
        Err(SteamDmenuError::Path { .. }) => {
            writeln!(out, "{MISSING_LIBRARY_MESSAGE}")?;
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read the Steam libraries"),
    };

    if mode.generates_scripts() {
        let path_output = args
            .output_path(path_home)
            .context("--output is required to generate scripts")?;

        match session.write_scripts(&path_output) {
            Ok(_) => {}
            Err(SteamDmenuError::Path { .. }) => writeln!(out, "{INVALID_OUTPUT_MESSAGE}")?,
            Err(e) => return Err(e).context("Failed to write launch scripts"),
        }
    }

    if mode.launches() {
        let selector =
            Selector::from_command_line(&args.dmenu, path_home)?.with_prefix(session.prefix());

        if let Selection::Aborted = session.select_and_launch(&tree, &selector, launcher)? {
            debug!("Nothing selected, exiting");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args = parse_cli();

    let result = home_dir()
        .map_err(anyhow::Error::from)
        .and_then(|path_home| run(&args, &path_home, &OpenHandler, &mut io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
