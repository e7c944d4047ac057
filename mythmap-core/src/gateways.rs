use std::io;

/// Storage for uploaded media files, addressed by file name.
pub trait MediaStore {
    fn store(&self, file_name: &str, data: &[u8]) -> io::Result<()>;

    /// Removing a missing file is not an error.
    fn remove(&self, file_name: &str) -> io::Result<()>;

    /// Public URL path of a stored file.
    fn url(&self, file_name: &str) -> String;
}
