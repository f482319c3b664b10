use std::path::{Path, PathBuf};

use crate::{data::AppId, parsers::parse_vdf, vdf::VdfNode};

/// Mock library folders and app manifests, checked in next to the crate's sources
pub fn get_mock_file_system_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mock_file_system")
}

/// Text of a `libraryfolders.vdf` listing the given `(id, path, apps)` libraries
pub fn get_mock_library_document_text(libraries: &[(&str, PathBuf, Vec<AppId>)]) -> String {
    let mut text = String::from("\"libraryfolders\"\n{\n");

    for (id, path, apps) in libraries {
        text.push_str(&format!(
            "\t\"{id}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t\t\"label\"\t\t\"\"\n\t\t\"apps\"\n\t\t{{\n",
            path.to_string_lossy().replace('\\', "\\\\")
        ));
        for app_id in apps {
            text.push_str(&format!("\t\t\t\"{app_id}\"\t\t\"0\"\n"));
        }
        text.push_str("\t\t}\n\t}\n");
    }

    text.push_str("}\n");
    text
}

pub fn get_mock_library_document(libraries: &[(&str, PathBuf, Vec<AppId>)]) -> VdfNode {
    parse_vdf(&get_mock_library_document_text(libraries))
        .expect("mock library document should be valid")
}

/// Writes a `libraryfolders.vdf` into `dir`, returning its path
pub fn write_library_document(dir: &Path, libraries: &[(&str, PathBuf, Vec<AppId>)]) -> PathBuf {
    let path = dir.join("libraryfolders.vdf");
    std::fs::write(&path, get_mock_library_document_text(libraries))
        .expect("should be able to write mock library document");
    path
}
