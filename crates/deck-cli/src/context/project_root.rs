use std::path::{Path, PathBuf};

use deck_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.taskdeck` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::find_project_root;

    #[test]
    fn finds_root_in_parent_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".taskdeck")).unwrap();
        std::fs::create_dir_all(temp.path().join("a/b")).unwrap();

        let found = find_project_root(&temp.path().join("a/b"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn returns_none_without_marker() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("a/b")).unwrap();
        // the temp dir itself lives under a system path with no `.taskdeck`
        assert!(find_project_root(&temp.path().join("a/b")).is_none());
    }
}
