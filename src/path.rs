//! Path helpers for command implementations.
//!
//! Paths here are plain strings in the shell's virtual namespace; nothing in
//! this module looks at a real filesystem.

use crate::config::PathConfig;
use crate::error::PathError;

/// Path operations bound to one separator character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathUtils {
    separator: char,
}

impl Default for PathUtils {
    fn default() -> Self {
        Self { separator: '/' }
    }
}

impl PathUtils {
    pub fn new(config: &PathConfig) -> Self {
        Self {
            separator: config.separator,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Resolve `.` and `..` and drop blank segments. `..` at the root is dropped.
    pub fn normalize<S: AsRef<str>>(&self, segments: &[S]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(segments.len());
        for segment in segments.iter().map(|s| s.as_ref()) {
            match segment {
                "." => {}
                ".." => {
                    out.pop();
                }
                s if s.trim().is_empty() => {}
                s => out.push(s.to_string()),
            }
        }
        out
    }

    /// Join parts into one absolute path with single separators.
    pub fn join_absolute<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let sep = self.separator;
        let mut path = String::new();
        for part in parts
            .iter()
            .map(|p| p.as_ref().trim_matches(sep))
            .filter(|p| !p.is_empty())
        {
            path.push(sep);
            path.push_str(part);
        }
        if path.is_empty() {
            path.push(sep);
        }
        path
    }

    /// Split an absolute path into its non-empty segments.
    pub fn split_absolute(&self, path: &str) -> Result<Vec<String>, PathError> {
        if path.trim().is_empty() || !path.starts_with(self.separator) {
            return Err(PathError::MalformedPath {
                path: path.to_string(),
            });
        }
        Ok(path
            .split(self.separator)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Resolve `path` against the absolute directory `cwd`.
    pub fn resolve(&self, cwd: &str, path: &str) -> Result<String, PathError> {
        let mut segments = if path.starts_with(self.separator) {
            Vec::new()
        } else {
            self.split_absolute(cwd)?
        };
        segments.extend(
            path.split(self.separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        let normalized = self.normalize(&segments);
        Ok(self.join_absolute(&normalized))
    }

    /// Last segment, like `basename`.
    pub fn file_name<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.trim_end_matches(self.separator)
            .rsplit(self.separator)
            .next()
            .filter(|s| !s.is_empty())
    }

    /// Everything before the last segment, like `dirname`.
    pub fn parent(&self, path: &str) -> String {
        let trimmed = path.trim_end_matches(self.separator);
        match trimmed.rfind(self.separator) {
            Some(0) => self.separator.to_string(),
            Some(i) => trimmed[..i].to_string(),
            None if path.starts_with(self.separator) => self.separator.to_string(),
            None => ".".to_string(),
        }
    }
}

pub fn normalize<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    PathUtils::default().normalize(segments)
}

pub fn join_absolute<S: AsRef<str>>(parts: &[S]) -> String {
    PathUtils::default().join_absolute(parts)
}

pub fn split_absolute(path: &str) -> Result<Vec<String>, PathError> {
    PathUtils::default().split_absolute(path)
}

pub fn resolve(cwd: &str, path: &str) -> Result<String, PathError> {
    PathUtils::default().resolve(cwd, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_strips_separators() {
        assert_eq!(join_absolute(&["a", "/b/", "/c"]), "/a/b/c");
        assert_eq!(join_absolute(&["", "/", ""]), "/");
        assert_eq!(join_absolute::<&str>(&[]), "/");
    }

    #[test]
    fn normalize_dots() {
        assert_eq!(normalize(&["a", ".", "b", ".."]), vec!["a"]);
        assert_eq!(normalize(&["..", "..", "x", " ", ""]), vec!["x"]);
    }

    #[test]
    fn split_requires_absolute() {
        assert_eq!(split_absolute("/usr//bin/").unwrap(), vec!["usr", "bin"]);
        assert!(split_absolute("/").unwrap().is_empty());
        assert!(matches!(split_absolute(""), Err(PathError::MalformedPath { .. })));
        assert!(matches!(split_absolute("  "), Err(PathError::MalformedPath { .. })));
        assert!(matches!(split_absolute("rel/path"), Err(PathError::MalformedPath { .. })));
    }

    #[test]
    fn resolve_relative_and_absolute() {
        assert_eq!(resolve("/home/user", "docs/../notes").unwrap(), "/home/user/notes");
        assert_eq!(resolve("/home/user", "/etc/./hosts").unwrap(), "/etc/hosts");
        assert_eq!(resolve("/", "../../..").unwrap(), "/");
        assert_eq!(resolve("/tmp", "").unwrap(), "/tmp");
        assert!(resolve("tmp", "x").is_err());
    }

    #[test]
    fn basename_and_dirname() {
        let paths = PathUtils::default();
        assert_eq!(paths.file_name("/a/b.txt"), Some("b.txt"));
        assert_eq!(paths.file_name("/a/b/"), Some("b"));
        assert_eq!(paths.file_name("/"), None);
        assert_eq!(paths.parent("/a/b.txt"), "/a");
        assert_eq!(paths.parent("/a"), "/");
        assert_eq!(paths.parent("/"), "/");
        assert_eq!(paths.parent("file"), ".");
    }

    #[test]
    fn custom_separator() {
        let paths = PathUtils::new(&PathConfig { separator: '\\' });
        assert_eq!(paths.join_absolute(&["a", "b\\"]), "\\a\\b");
        assert_eq!(paths.split_absolute("\\x\\y").unwrap(), vec!["x", "y"]);
    }
}
