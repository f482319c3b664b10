//! Launch installed Steam games through `dmenu`, or any other selector which reads choices from
//! standard input and prints the chosen line to standard output.
//!
//! # Description
//!
//! The crate reads Steam's `libraryfolders.vdf` to find every library folder, reads the
//! `appmanifest_<id>.acf` of each app installed in those folders to get its title, and renders
//! one menu line per app (e.g. `play 440: Team Fortress 2`). The line the user picks is turned
//! back into an app ID and handed over to Steam via a `steam://run/<id>` link. It can also write
//! one small launcher script per game, for launchers which list executables in a directory.
//!
//! Tools and runtimes which Steam installs like games (Proton, the Steam Linux Runtime, ...) are
//! hidden by default, see [`data::ExclusionSet`].
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use steam_dmenu::{
//!     data::{ExclusionSet, Selection},
//!     launch::OpenHandler,
//!     selector::Selector,
//!     session::Session,
//! };
//!
//! # fn main() -> steam_dmenu::error::Result<()> {
//! let path_home = Path::new("/home/user");
//! let mut session = Session::new(ExclusionSet::default(), "play ");
//!
//! let tree = session.load_library_tree(
//!     &path_home.join(".local/share/Steam/steamapps/libraryfolders.vdf"),
//! )?;
//! let selector = Selector::from_command_line("dmenu -i", path_home)?.with_prefix("play ");
//!
//! if let Selection::Chosen(app_id) = session.select_and_launch(&tree, &selector, &OpenHandler)? {
//!     println!("Launched {app_id}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod launch;
pub mod library;
mod macros;
pub mod manifest;
pub mod menu;
pub mod parsers;
pub mod selector;
pub mod session;
pub mod utils;
pub mod vdf;

#[cfg(test)]
mod test_utils;
