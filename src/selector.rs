//! Driving an external, line based selector such as `dmenu`, `rofi -dmenu` or `fuzzel --dmenu`.

use std::{
    io::{self, Write},
    path::Path,
    process::{ChildStdin, Command, Stdio},
    thread,
};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    data::{AppId, Selection},
    error::{Result, SteamDmenuError},
    utils::expand_home,
};

/// Interprets the selector's output, e.g. `play 440: Team Fortress 2` → app 440.
///
/// Everything before the first `:` must be an app ID, optionally preceded by the menu prefix.
pub fn parse_selection(output: &str, prefix: &str) -> Selection {
    let Some(first_line) = output.lines().next() else {
        return Selection::Aborted;
    };

    let token = first_line.split(':').next().unwrap_or_default();
    let token = token.strip_prefix(prefix).unwrap_or(token).trim();

    match token.parse::<AppId>() {
        Ok(app_id) => Selection::Chosen(app_id),
        Err(_) => {
            trace!("Selector output is not an app ID: {token:?}");
            Selection::Aborted
        }
    }
}

/// Writes the menu to the selector's input, closing it once done
fn write_menu(stdin: Option<ChildStdin>, menu: &[u8]) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };

    match stdin.write_all(menu) {
        // The selector is free to exit without reading everything
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Selector closed its input early");
            Ok(())
        }
        result => result,
    }
}

/// An external selector process, spawned once per selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    program: String,
    args: Vec<String>,
    prefix: String,
}

impl Selector {
    /// Splits the command line on whitespace; quoting is not supported. A leading `~` or `$HOME`
    /// in the program is expanded to `path_home`.
    pub fn from_command_line(command_line: &str, path_home: &Path) -> Result<Self> {
        let mut tokens = command_line.split_whitespace();

        let program = tokens
            .next()
            .ok_or_else(|| SteamDmenuError::Selector("empty command".to_string()))?;

        Ok(Self {
            program: expand_home(program, path_home).to_string_lossy().to_string(),
            args: tokens.map(str::to_string).collect(),
            prefix: String::new(),
        })
    }

    /// Prefix of the menu lines, stripped from the selector's output before reading the app ID
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Shows the given lines in the selector, and returns the app the user picked.
    ///
    /// Blocks until the selector exits. A selector which fails, prints nothing, or prints
    /// something other than one of the menu lines results in [`Selection::Aborted`].
    #[tracing::instrument(level = "trace", skip(lines))]
    pub fn select(&self, lines: &[String]) -> Result<Selection> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();
        let menu = lines.iter().join("\n");

        // The menu is written from another thread while stdout is drained here, otherwise a
        // selector which echoes its input can fill its stdout pipe and block us both
        let output = thread::scope(|scope| {
            let writer = scope.spawn(move || write_menu(stdin, menu.as_bytes()));
            let output = child.wait_with_output();

            match writer.join() {
                Ok(written) => written?,
                Err(err) => std::panic::resume_unwind(err),
            }

            output
        })?;

        if !output.status.success() {
            debug!("Selector exited with {}", output.status);
            return Ok(Selection::Aborted);
        }

        let selection = parse_selection(&String::from_utf8_lossy(&output.stdout), &self.prefix);
        debug!("Selector returned {selection}");

        Ok(selection)
    }
}
