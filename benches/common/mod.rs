use std::path::Path;

pub const APP_COUNT: u32 = 500;

/// Writes a library folder with `APP_COUNT` app manifests into `dir`, and returns the text of a
/// `libraryfolders.vdf` which lists it
pub fn write_mock_library(dir: &Path) -> String {
    let path_steamapps = dir.join("steamapps");
    std::fs::create_dir_all(&path_steamapps).unwrap();

    let mut apps = String::new();
    for app_id in 0..APP_COUNT {
        std::fs::write(
            path_steamapps.join(format!("appmanifest_{app_id}.acf")),
            format!(
                "\"AppState\"\n{{\n\t\"appid\"\t\t\"{app_id}\"\n\t\"name\"\t\t\"Game™ number {app_id}\"\n\t\"installdir\"\t\t\"Game {app_id}\"\n}}\n"
            ),
        )
        .unwrap();
        apps.push_str(&format!("\t\t\t\"{app_id}\"\t\t\"1024\"\n"));
    }

    format!(
        "\"libraryfolders\"\n{{\n\t\"0\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t\t\"apps\"\n\t\t{{\n{apps}\t\t}}\n\t}}\n}}\n",
        dir.to_string_lossy()
    )
}
