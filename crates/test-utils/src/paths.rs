//! Locations of checked-in test data.
//!
//! Each crate keeps its data files in `crates/<name>/testdata/`.

use std::path::{Path, PathBuf};

/// The workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// `crates/<crate_name>/testdata/`.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root().join("crates").join(crate_name).join("testdata")
}

/// A file in a crate's testdata directory.
pub fn testdata_file(crate_name: &str, name: &str) -> PathBuf {
    crate_testdata_dir(crate_name).join(name)
}
