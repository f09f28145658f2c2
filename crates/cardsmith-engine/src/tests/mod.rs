use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small template with every insertion point the default selectors expect
pub const TEST_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="300"><rect id="background" width="200" height="300" fill="#333"/><image id="photo" href="placeholder.png"/><text id="title" x="100" y="150">Title</text><text id="backtext" x="28" y="170" font-size="10"/></svg>"##;

/// Create a temporary working directory
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
