mod archive;
mod bin;
pub mod ext;
mod extract;
mod filter;
mod list;

pub use archive::*;
pub use bin::*;
pub use extract::*;
pub use filter::*;
pub use list::*;

pub use ustar_core::{Entry, EntryKind, Header, Mode};

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ustar_core::Error),

    #[error("{context}{}", display_path(.path))]
    Io {
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
        context: &'static str,
    },

    #[error("Unsupported entry type {typeflag:?}: {}", .entry.display())]
    UnsupportedEntry { entry: PathBuf, typeflag: char },

    #[error("Invalid path component '{}' in {}", .component.display(), .entry.display())]
    InvalidPath { entry: PathBuf, component: PathBuf },

    #[error("Entry {} declares {size} bytes but carries no data", .entry.display())]
    MissingData { entry: PathBuf, size: u64 },

    #[error("Owner {uid}:{gid} of {} is out of range", .entry.display())]
    InvalidOwner { entry: PathBuf, uid: u64, gid: u64 },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(": {}", path.display()),
        None => String::new(),
    }
}

/// Build a closure mapping an [`io::Error`] into [`Error::Io`], optionally
/// recording the path that was being worked on.
#[macro_export]
macro_rules! wrap_io_err {
    ($path:expr, $context:expr) => {
        |source| $crate::Error::Io {
            source,
            path: Some(::std::path::PathBuf::from(&$path)),
            context: $context,
        }
    };
    ($context:expr) => {
        |source| $crate::Error::Io {
            source,
            path: None,
            context: $context,
        }
    };
}
