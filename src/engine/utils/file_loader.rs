use std::path::Path;

/// Reads the whole file at `path` into memory.
///
/// An unreadable file is logged and reported as `None` rather than an error,
/// so the caller decides whether a missing file matters. The size of a loaded
/// file is the length of the returned buffer.
pub fn load_file(path: impl AsRef<Path>) -> Option<Vec<u8>> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => {
            log::info!("file {} loaded ({} bytes)", path.display(), bytes.len());
            Some(bytes)
        }
        Err(err) => {
            log::warn!("Unable to open file {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rt3d-demo-{}-{name}", std::process::id()))
    }

    #[test]
    fn loads_every_byte_of_an_existing_file() {
        let path = scratch_path("loader.vert");
        let contents = b"#version 330\nvoid main() {}\n\x00\xff";
        std::fs::write(&path, contents).unwrap();

        let loaded = load_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.as_ref().map_or(0, Vec::len), contents.len());
        assert_eq!(loaded.as_deref(), Some(&contents[..]));
    }

    #[test]
    fn empty_file_loads_as_empty_buffer() {
        let path = scratch_path("empty.frag");
        std::fs::write(&path, b"").unwrap();

        let loaded = load_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, Some(Vec::new()));
    }

    #[test]
    fn missing_file_reports_nothing_loaded() {
        let loaded = load_file(scratch_path("does-not-exist.vert"));
        assert!(loaded.is_none());
        assert_eq!(loaded.map_or(0, |bytes| bytes.len()), 0);
    }
}
