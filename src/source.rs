use std::fs;
use std::path::Path;

use crate::error::{LoadError, LoadResult};

// --- Fetch the deck source ---
pub fn fetch_markdown(path: &Path) -> LoadResult<String> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Fetch {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "fetched slide source");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_fetch_error() {
        let err = fetch_markdown(Path::new("definitely/not/here/slides.md")).unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.md");
        fs::write(&path, "# Hi").unwrap();
        assert_eq!(fetch_markdown(&path).unwrap(), "# Hi");
    }
}
