//! Extention traits for base types defined in `ustar-core`.
use std::path::{Component, Path, PathBuf};

use ustar_core::Header;

use crate::Error;

pub trait HeaderExt {
    /// The member path: `prefix` joined with `name`
    fn path(&self) -> PathBuf;

    /// Like [`path`](HeaderExt::path), but fails on root, prefix or `..`
    /// components. Symlinks already on disk are not looked at here.
    fn check_path(&self) -> Result<PathBuf, Error>;
}

impl HeaderExt for Header {
    fn path(&self) -> PathBuf {
        if self.prefix.is_empty() {
            PathBuf::from(&self.name)
        } else {
            Path::new(&self.prefix).join(&self.name)
        }
    }

    fn check_path(&self) -> Result<PathBuf, Error> {
        let path = self.path();
        check_relative(&path)?;
        Ok(path)
    }
}

/// Iterate the components of the path and ensure that there are only
/// normal or `.` components.
pub fn check_relative(path: &Path) -> Result<&Path, Error> {
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            invalid => {
                let bad_component: &Path = invalid.as_ref();
                return Err(Error::InvalidPath {
                    entry: path.to_path_buf(),
                    component: bad_component.to_path_buf(),
                });
            }
        }
    }
    Ok(path)
}
