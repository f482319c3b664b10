use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use pretty_assertions::assert_eq;
use steam_dmenu::{
    data::{AppId, ExclusionSet, Selection},
    error::{Result, SteamDmenuError},
    launch::GameLauncher,
    selector::Selector,
    session::Session,
};

fn get_mock_libraries_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mock_file_system/steam_libraries")
}

fn write_library_document(dir: &Path, libraries: &[(&str, PathBuf, Vec<AppId>)]) -> PathBuf {
    let mut text = String::from("\"libraryfolders\"\n{\n");
    for (id, path, apps) in libraries {
        text.push_str(&format!(
            "\t\"{id}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t\t\"apps\"\n\t\t{{\n",
            path.display()
        ));
        for app_id in apps {
            text.push_str(&format!("\t\t\t\"{app_id}\"\t\t\"0\"\n"));
        }
        text.push_str("\t\t}\n\t}\n");
    }
    text.push_str("}\n");

    let path = dir.join("libraryfolders.vdf");
    std::fs::write(&path, text).unwrap();
    path
}

#[derive(Default)]
struct RecordingLauncher {
    launched: RefCell<Vec<AppId>>,
}

impl GameLauncher for RecordingLauncher {
    fn launch(&self, app_id: AppId) -> Result<()> {
        self.launched.borrow_mut().push(app_id);
        Ok(())
    }
}

#[test]
fn test_menu_from_library_document() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path_document = write_library_document(
        dir.path(),
        &[("0", get_mock_libraries_path().join("1"), vec![440, 228980])],
    );

    let mut session = Session::new(ExclusionSet::default(), "play ");
    let tree = session.load_library_tree(&path_document)?;

    assert_eq!(session.menu_lines(&tree), ["play 440: Team Fortress 2"]);

    Ok(())
}

#[test]
fn test_missing_manifest_aborts_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path_document = write_library_document(
        dir.path(),
        &[("0", get_mock_libraries_path().join("1"), vec![440, 999])],
    );

    let mut session = Session::new(ExclusionSet::default(), "play ");

    assert!(matches!(
        session.load_library_tree(&path_document),
        Err(SteamDmenuError::ManifestNotFound { app_id: 999, .. })
    ));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_generate_scripts_then_launch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path_scripts = dir.path().join("scripts");
    std::fs::create_dir(&path_scripts)?;

    let path_document = write_library_document(
        dir.path(),
        &[
            ("0", PathBuf::from("/this/library/is/not/mounted"), vec![1]),
            (
                "1",
                get_mock_libraries_path().join("2"),
                vec![1493710, 105600, 1245620],
            ),
        ],
    );

    let blocked = ExclusionSet::parse(["1245620"])?;
    let mut session = Session::new(blocked, "");
    let tree = session.load_library_tree(&path_document)?;

    // Custom exclusions replace the defaults, so Proton is now listed
    assert_eq!(
        session.menu_lines(&tree),
        ["1493710: Proton Experimental", "105600: Terraria"]
    );

    let mut written = session.write_scripts(&path_scripts)?;
    written.sort();
    assert_eq!(
        written,
        [
            path_scripts.join("Proton Experimental"),
            path_scripts.join("Terraria")
        ]
    );

    let launcher = RecordingLauncher::default();
    let selector = Selector::from_command_line("tail -n 1", Path::new("/"))?;

    assert_eq!(
        session.select_and_launch(&tree, &selector, &launcher)?,
        Selection::Chosen(105600)
    );
    assert_eq!(launcher.launched.borrow().as_slice(), [105600]);

    Ok(())
}
