//! Filesystem provider trait and error type.
//!
//! The job only needs to check for and create the output directory; sitemap
//! files themselves are written by [`SitemapWriter`](crate::SitemapWriter).

use std::path::{Path, PathBuf};

/// Semantic error categories for filesystem operations.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FileSystemErrorKind {
    /// A parent path does not exist or is not a directory.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// A non-directory already occupies the path.
    AlreadyExists,
    /// Other/unknown error category.
    Other,
}

/// Filesystem error with semantic kind, path context and source.
#[derive(Debug)]
pub struct FileSystemError {
    /// Semantic error category.
    pub kind: FileSystemErrorKind,
    /// Path the operation was applied to.
    pub path: PathBuf,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FileSystemError {
    /// Create a new error for `path`.
    #[must_use]
    pub fn new(kind: FileSystemErrorKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            source: None,
        }
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => FileSystemErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => FileSystemErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => FileSystemErrorKind::AlreadyExists,
            _ => FileSystemErrorKind::Other,
        };
        Self::new(kind, path).with_source(err)
    }
}

impl std::fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message (path: /foo/bar)"
        let kind_str = match self.kind {
            FileSystemErrorKind::NotFound => "Not found",
            FileSystemErrorKind::PermissionDenied => "Permission denied",
            FileSystemErrorKind::AlreadyExists => "Already exists",
            FileSystemErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        write!(f, " (path: {})", self.path.display())
    }
}

impl std::error::Error for FileSystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Directory operations needed by the sitemap job.
pub trait Filesystem: Send + Sync {
    /// Whether `path` exists and is a directory.
    ///
    /// Returns `false` on errors.
    fn is_directory(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents with the given Unix `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the directory cannot be created.
    fn create_directory(&self, path: &Path, mode: u32) -> Result<(), FileSystemError>;
}

/// [`Filesystem`] backed by the local disk.
///
/// `mode` is applied on Unix (subject to the process umask) and ignored elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&self, path: &Path, mode: u32) -> Result<(), FileSystemError> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }

        builder
            .create(path)
            .map_err(|e| FileSystemError::io(e, path))?;
        tracing::debug!(path = %path.display(), mode = %format!("{mode:o}"), "Created directory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_nested_directory() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("pub/vsf/sitemap");

        assert!(!LocalFilesystem.is_directory(&target));
        LocalFilesystem.create_directory(&target, 0o775).unwrap();
        assert!(LocalFilesystem.is_directory(&target));
    }

    #[test]
    fn test_create_existing_directory_is_ok() {
        let temp = tempfile::tempdir().unwrap();

        LocalFilesystem
            .create_directory(temp.path(), 0o775)
            .unwrap();
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("sitemap.xml");
        std::fs::write(&file, "").unwrap();

        assert!(!LocalFilesystem.is_directory(&file));
    }

    #[test]
    fn test_create_below_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("blocker");
        std::fs::write(&file, "").unwrap();
        let target = file.join("sitemap");

        let err = LocalFilesystem.create_directory(&target, 0o775).unwrap_err();

        assert_eq!(err.path, target);
        assert!(err.to_string().contains("(path: "));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("restricted");

        LocalFilesystem.create_directory(&target, 0o700).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_error_from_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = FileSystemError::io(io_err, "/pub/vsf");

        assert_eq!(err.kind, FileSystemErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "Permission denied: access denied (path: /pub/vsf)");
    }

    #[test]
    fn test_error_display_without_source() {
        let err = FileSystemError::new(FileSystemErrorKind::Other, "/pub");

        assert_eq!(err.to_string(), "Error (path: /pub)");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileSystemError>();
    }
}
