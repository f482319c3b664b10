use std::process::Command;

use itertools::Itertools;

/// Returns a std::process::Command from a given command str and it's arguments
pub fn get_launch_command<'a>(
    command: &str,
    args: impl IntoIterator<Item = &'a str>,
    env_vars: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Command {
    let mut command = Command::new(command);
    command.envs(env_vars).args(args);

    command
}

pub fn get_launch_command_flatpak<'a>(
    app_name: &str,
    flatpak_args: impl IntoIterator<Item = &'a str>,
    other_args: impl IntoIterator<Item = &'a str>,
    env_vars: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Command {
    let mut command = get_launch_command("flatpak", flatpak_args, env_vars);
    command.arg("run").arg(app_name).args(other_args);

    command
}

/// Renders a command as a single line for a shell script, e.g. `steam steam://rungameid/440`
pub fn command_line(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|arg| arg.to_string_lossy())
        .join(" ")
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_command_line() {
        assert_eq!(
            command_line(&get_launch_command("steam", ["steam://rungameid/440"], [])),
            "steam steam://rungameid/440"
        );
        assert_eq!(
            command_line(&get_launch_command_flatpak(
                "com.valvesoftware.Steam",
                [],
                ["steam://rungameid/440"],
                []
            )),
            "flatpak run com.valvesoftware.Steam steam://rungameid/440"
        );
    }
}
