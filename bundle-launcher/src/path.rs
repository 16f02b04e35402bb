use std::fmt;
use std::path::{Path, PathBuf};

/// Returned when a path would grow past the capacity of its [`BoundedPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityExceeded {
    /// Length in bytes that the path would have had
    pub len: usize,

    /// Maximum length in bytes allowed
    pub capacity: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path of {} bytes exceeds the limit of {} bytes",
            self.len, self.capacity
        )
    }
}

impl std::error::Error for CapacityExceeded {}

/// An owned path that never grows past a fixed number of bytes.
///
/// Every operation that lengthens the path is checked and fails with
/// [`CapacityExceeded`] instead of truncating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedPath {
    inner: PathBuf,
    capacity: usize,
}

impl BoundedPath {
    /// Wraps `path`, failing if it is already longer than `capacity` bytes.
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, CapacityExceeded> {
        let inner = path.into();
        let len = inner.as_os_str().len();
        if len > capacity {
            return Err(CapacityExceeded { len, capacity });
        }

        Ok(Self { inner, capacity })
    }

    /// Returns the directory containing this path.
    ///
    /// Mirrors `dirname(3)`: the root is its own parent and a bare file name
    /// has `.` as its parent.
    pub fn parent(&self) -> Self {
        let inner = match self.inner.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_path_buf(),
            None if self.inner.has_root() => self.inner.clone(),
            None => PathBuf::from("."),
        };

        Self {
            inner,
            capacity: self.capacity,
        }
    }

    /// Appends `component`, failing if the result would exceed the capacity.
    pub fn join(&self, component: impl AsRef<Path>) -> Result<Self, CapacityExceeded> {
        Self::new(self.inner.join(component), self.capacity)
    }

    /// Length of the path in bytes.
    pub fn len(&self) -> usize {
        self.inner.as_os_str().len()
    }

    /// Returns `true` if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum length in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Borrows the underlying [`Path`].
    pub fn as_path(&self) -> &Path {
        &self.inner
    }
}

impl AsRef<Path> for BoundedPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{BoundedPath, CapacityExceeded};

    #[test]
    fn new_over_capacity() {
        assert_eq!(
            BoundedPath::new("/a/b/c", 5).unwrap_err(),
            CapacityExceeded {
                len: 6,
                capacity: 5
            }
        );
        assert_eq!(BoundedPath::new("/a/b/c", 6).unwrap().len(), 6);
    }

    #[test]
    fn parent_of_nested_file() {
        let path = BoundedPath::new("/a/b/c/binary", 1024).unwrap();
        assert_eq!(path.parent().as_path(), Path::new("/a/b/c"));
    }

    #[test]
    fn parent_of_root_and_top_level() {
        let root = BoundedPath::new("/", 1024).unwrap();
        assert_eq!(root.parent().as_path(), Path::new("/"));

        let top_level = BoundedPath::new("/binary", 1024).unwrap();
        assert_eq!(top_level.parent().as_path(), Path::new("/"));
    }

    #[test]
    fn parent_of_bare_name() {
        let path = BoundedPath::new("binary", 1024).unwrap();
        assert_eq!(path.parent().as_path(), Path::new("."));
    }

    #[test]
    fn join_does_not_duplicate_separators() {
        let root = BoundedPath::new("/", 1024).unwrap();
        assert_eq!(root.join("lib").unwrap().as_path(), Path::new("/lib"));

        let dir = BoundedPath::new("/opt/bundle/bin", 1024).unwrap();
        assert_eq!(
            dir.join("lib").unwrap().as_path().to_str(),
            Some("/opt/bundle/bin/lib")
        );
    }

    #[test]
    fn join_fails_instead_of_overflowing() {
        let dir = BoundedPath::new("/opt", 7).unwrap();
        assert_eq!(
            dir.join("lib").unwrap_err(),
            CapacityExceeded {
                len: 8,
                capacity: 7
            }
        );
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.capacity(), 7);
    }

    #[test]
    fn join_exactly_at_capacity() {
        let dir = BoundedPath::new("/opt", 8).unwrap();
        let joined = dir.join("li").unwrap();
        assert_eq!(joined.len(), 7);
        joined.join("b").unwrap_err();
    }
}
