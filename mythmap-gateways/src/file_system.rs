use mythmap_core::gateways::MediaStore;
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Component, Path, PathBuf},
};

/// Stores uploaded media files below a root directory.
///
/// File names are relative paths like `place_images/<id>.jpg` and
/// are served under the configured base URL.
#[derive(Debug, Clone)]
pub struct FileSystemMediaStore {
    root: PathBuf,
    base_url: String,
}

impl FileSystemMediaStore {
    pub fn try_new<P: AsRef<Path>>(root: P, base_url: &str) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        let mut base_url = base_url.to_owned();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        debug!("Storing media files in {}", root.display());
        Ok(Self { root, base_url })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file_name: &str) -> io::Result<PathBuf> {
        let relative = Path::new(file_name);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if file_name.is_empty() || !is_plain {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid media file name: {file_name}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl MediaStore for FileSystemMediaStore {
    fn store(&self, file_name: &str, data: &[u8]) -> io::Result<()> {
        let path = self.path(file_name)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, data)?;
        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    fn remove(&self, file_name: &str) -> io::Result<()> {
        let path = self.path(file_name)?;
        match fs::remove_file(&path) {
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Media file {} has already been removed", path.display());
                Ok(())
            }
            res => res,
        }
    }

    fn url(&self, file_name: &str) -> String {
        format!("{}{}", self.base_url, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_remove_files_in_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemMediaStore::try_new(dir.path(), "/media").unwrap();
        store.store("place_images/abc.png", b"png").unwrap();
        let path = dir.path().join("place_images").join("abc.png");
        assert_eq!(b"png".to_vec(), fs::read(&path).unwrap());

        store.remove("place_images/abc.png").unwrap();
        assert!(!path.exists());
        // removing twice is fine
        store.remove("place_images/abc.png").unwrap();
    }

    #[test]
    fn urls_below_the_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemMediaStore::try_new(dir.path(), "/media").unwrap();
        assert_eq!("/media/note_images/x.jpg", store.url("note_images/x.jpg"));
        let store = FileSystemMediaStore::try_new(dir.path(), "https://example.com/m/").unwrap();
        assert_eq!("https://example.com/m/a.gif", store.url("a.gif"));
    }

    #[test]
    fn reject_paths_outside_of_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemMediaStore::try_new(dir.path().join("media"), "/media/").unwrap();
        for name in ["../evil.png", "/etc/passwd", "", "a/../../b.png"] {
            let err = store.store(name, b"x").unwrap_err();
            assert_eq!(ErrorKind::InvalidInput, err.kind());
        }
    }
}
