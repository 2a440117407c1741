use std::sync::Arc;

/// One step of a [Path].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathKey {
    Field(String),
    Index(usize),
}
impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        Self::Field(key.to_string())
    }
}
impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a value nested inside an input value, e.g.
/// `value.filters.groups[1]`.
///
/// Paths are immutable linked lists: extending a path allocates a new head
/// that shares its tail with every other path extended from the same
/// parent.
#[derive(Debug, Eq, PartialEq)]
pub struct Path {
    key: PathKey,
    previous: Option<Arc<Path>>,
}
impl Path {
    /// Extends `previous` (or starts a new path when it is `None`).
    pub fn extend(previous: Option<&Arc<Path>>, key: impl Into<PathKey>) -> Arc<Path> {
        Arc::new(Self {
            key: key.into(),
            previous: previous.cloned(),
        })
    }

    pub fn key(&self) -> &PathKey {
        &self.key
    }

    /// Every key of the path, from the outermost to this one.
    pub fn keys(&self) -> Vec<&PathKey> {
        let mut keys = vec![&self.key];
        let mut current = self.previous.as_deref();
        while let Some(path) = current {
            keys.push(&path.key);
            current = path.previous.as_deref();
        }
        keys.reverse();
        keys
    }

    pub fn previous(&self) -> Option<&Arc<Path>> {
        self.previous.as_ref()
    }
}
impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "value")?;
        for key in self.keys() {
            match key {
                PathKey::Field(name) => write!(f, ".{name}")?,
                PathKey::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
