mod commands;
mod paths;
mod strings;

pub use commands::{command_line, get_launch_command, get_launch_command_flatpak};
pub use paths::{expand_home, home_dir, some_if_dir, some_if_file};
pub use strings::to_ascii_title;
