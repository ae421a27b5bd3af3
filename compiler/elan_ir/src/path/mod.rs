//! Filesystem path helpers for the importer.
//!
//! Grounded on `cspark/spark/compiler/fsimport.cpp`'s use of
//! `support::Path`: joining a directory and a name (`Path(path,
//! "package.txt")`), re-suffixing (`entryPath.withSuffix(".sp")`),
//! stripping a common prefix (`getPackageForPath`'s `pathParts`/
//! `rootParts` loop), and splitting into dotted components
//! (`path.parts()`).

use std::path::{Component, PathBuf};

/// A thin wrapper over `PathBuf` with the join/relativize/parts
/// operations the importer needs. `spec.md` §8.2: `Path("foo") ⊕ "bar"`
/// has string form `"foo/bar"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path(PathBuf);

impl Path {
    #[must_use]
    pub fn new(p: impl Into<PathBuf>) -> Self {
        Path(p.into())
    }

    #[must_use]
    pub fn as_std(&self) -> &std::path::Path {
        &self.0
    }

    /// Join a path and a name component. `Path("foo") ⊕ "bar" ==
    /// Path("foo/bar")`.
    #[must_use]
    pub fn join(&self, name: &str) -> Path {
        Path(self.0.join(name))
    }

    /// Replace (or add) the extension. `entryPath.withSuffix(".sp")`.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Path {
        let mut s = self.0.clone().into_os_string();
        s.push(suffix);
        Path(PathBuf::from(s))
    }

    /// File name without extension.
    #[must_use]
    pub fn stem(&self) -> String {
        self.0
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name with extension.
    #[must_use]
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Dotted path components, in order: `Path("a/test/path").parts() ==
    /// ["a", "test", "path"]`.
    #[must_use]
    pub fn parts(&self) -> Vec<String> {
        self.0
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    }

    /// Strip `base`'s components off the front of `self`'s components.
    /// `Path("a/test/path/thingy").make_relative(Path("a/test")) ==
    /// Path("path/thingy")`.
    ///
    /// Returns `self` unchanged if `base` is not a prefix.
    #[must_use]
    pub fn make_relative(&self, base: &Path) -> Path {
        match self.0.strip_prefix(&base.0) {
            Ok(rest) => Path(rest.to_path_buf()),
            Err(_) => self.clone(),
        }
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.0.is_dir()
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.0.is_file()
    }

    /// List immediate children, skipping `.`/`..`. Empty if `self` is
    /// not a readable directory.
    #[must_use]
    pub fn read_dir_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.0) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl fmt_impl::Display for Path {
    fn fmt(&self, f: &mut fmt_impl::Formatter<'_>) -> fmt_impl::Result {
        write!(f, "{}", self.0.display())
    }
}

use std::fmt as fmt_impl;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_produces_foo_slash_bar() {
        let p = Path::new("foo").join("bar");
        assert_eq!(p.to_string_lossy(), "foo/bar");
    }

    #[test]
    fn make_relative_strips_common_prefix() {
        let p = Path::new("a/test/path/thingy");
        let base = Path::new("a/test");
        assert_eq!(p.make_relative(&base).to_string_lossy(), "path/thingy");
    }

    #[test]
    fn parts_splits_on_separators() {
        let p = Path::new("a/test/path");
        assert_eq!(p.parts(), vec!["a", "test", "path"]);
    }

    #[test]
    fn with_suffix_appends_extension() {
        let p = Path::new("foo/bar").with_suffix(".sp");
        assert_eq!(p.to_string_lossy(), "foo/bar.sp");
    }
}
