use std::path::{Component, Path, PathBuf};

use ustar_core::Header;

use crate::ext::HeaderExt;

/// Selects the entries that lie within a requested subtree
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathFilter {
    subtree: Option<PathBuf>,
}

impl PathFilter {
    /// A filter that includes every entry
    pub fn all() -> PathFilter {
        PathFilter { subtree: None }
    }

    /// A filter that includes `subtree` itself and everything nested below it
    pub fn subtree(subtree: impl AsRef<Path>) -> PathFilter {
        PathFilter {
            subtree: Some(normalize(subtree.as_ref())),
        }
    }

    pub fn new(subtree: Option<&Path>) -> PathFilter {
        match subtree {
            Some(subtree) => PathFilter::subtree(subtree),
            None => PathFilter::all(),
        }
    }

    pub fn subtree_path(&self) -> Option<&Path> {
        self.subtree.as_deref()
    }

    pub fn includes(&self, header: &Header) -> bool {
        self.includes_path(&header.path())
    }

    /// Paths are compared component by component, so `a/b` covers `a/b/c`
    /// but not `a/bc`.
    pub fn includes_path(&self, path: &Path) -> bool {
        match &self.subtree {
            Some(subtree) => normalize(path).starts_with(subtree),
            None => true,
        }
    }
}

/// Drop `.` components; trailing slashes are already ignored by [`Path::components`]
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
