use std::path::Path;

/// First `ScanNNN` name, counting from 1, with no `ScanNNN<extension>` file in `dir`.
///
/// Nothing is reserved, so two concurrent callers may get the same name.
pub fn next_available_filename(dir: &Path, extension: &str) -> String {
    let mut index = 1u32;

    loop {
        let name = format!("Scan{index:03}");
        if !dir.join(format!("{name}{extension}")).exists() {
            return name;
        }

        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn starts_from_first_index() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(next_available_filename(dir.path(), ".jpg"), "Scan001");
    }

    #[test]
    fn skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Scan001.jpg"), b"").unwrap();
        fs::write(dir.path().join("Scan002.jpg"), b"").unwrap();

        assert_eq!(next_available_filename(dir.path(), ".jpg"), "Scan003");
    }

    #[test]
    fn only_files_with_same_extension_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Scan001.tiff"), b"").unwrap();
        fs::write(dir.path().join("Scan002.jpg"), b"").unwrap();

        assert_eq!(next_available_filename(dir.path(), ".jpg"), "Scan001");
        assert_eq!(next_available_filename(dir.path(), ".tiff"), "Scan002");
    }

    #[test]
    fn fills_gaps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Scan001.jpg"), b"").unwrap();
        fs::write(dir.path().join("Scan003.jpg"), b"").unwrap();

        assert_eq!(next_available_filename(dir.path(), ".jpg"), "Scan002");
    }
}
