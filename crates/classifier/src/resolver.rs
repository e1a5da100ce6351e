//! Ordered set of service directories
//!
//! Directories are plain path strings compared by prefix. They are kept
//! sorted by descending length so that a nested service is always checked
//! before any of its ancestors.

/// Normalize a directory path to the `a/b/c` form used for prefix matching
pub fn normalize_dir(dir: &str) -> String {
    let mut dir = dir.replace('\\', "/");
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest.to_string();
    }
    let trimmed = dir.trim_end_matches('/');
    if trimmed == "." {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Service directories in longest-first order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDirectories {
    dirs: Vec<String>,
}

impl ServiceDirectories {
    /// Build the working set from discovered or supplied directories.
    ///
    /// Entries are normalized, empty entries dropped and duplicates removed.
    /// The sort is stable, so directories of equal length keep the order in
    /// which they were supplied.
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for dir in dirs {
            let dir = normalize_dir(dir.as_ref());
            if !dir.is_empty() && !set.dirs.contains(&dir) {
                set.dirs.push(dir);
            }
        }
        set.dirs.sort_by(|a, b| b.len().cmp(&a.len()));
        set
    }

    /// Insert a directory where it keeps the longest-first order.
    ///
    /// Returns `false` if the directory was empty or already present.
    pub fn insert(&mut self, dir: &str) -> bool {
        let dir = normalize_dir(dir);
        if dir.is_empty() || self.contains(&dir) {
            return false;
        }
        let position = self
            .dirs
            .iter()
            .position(|existing| existing.len() < dir.len())
            .unwrap_or(self.dirs.len());
        self.dirs.insert(position, dir);
        true
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.dirs.iter().any(|existing| existing == dir)
    }

    /// The innermost service directory owning `path`, if any.
    ///
    /// A directory owns a path only when the path continues with a `/`
    /// after the directory name, so `foo-bar/x` is not owned by `foo`.
    pub fn find_owner(&self, path: &str) -> Option<&str> {
        self.dirs
            .iter()
            .find(|dir| {
                path.strip_prefix(dir.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.dirs
    }
}

impl<S: AsRef<str>> FromIterator<S> for ServiceDirectories {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
