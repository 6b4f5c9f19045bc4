use alloc::vec::Vec;
use core::fmt::{self, Display};

use crate::{Header, Mode};

/// Member type, as selected by the header's type flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    RegularFile,
    HardLink,
    SymbolicLink,
    Unsupported(char),
}

impl From<char> for EntryKind {
    fn from(typeflag: char) -> EntryKind {
        match typeflag {
            '0' | '\0' => EntryKind::RegularFile,
            '1' => EntryKind::HardLink,
            '2' => EntryKind::SymbolicLink,
            '5' => EntryKind::Directory,
            other => EntryKind::Unsupported(other),
        }
    }
}

/// One archive member: its header and, for non-empty members, the payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub header: Header,
    /// Exactly `header.size` bytes; `None` when the size is zero
    pub data: Option<Vec<u8>>,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn kind(&self) -> EntryKind {
        self.header.kind()
    }

    pub fn mode(&self) -> Mode {
        self.header.mode()
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} data={}",
            self.header,
            self.data.as_ref().map_or(0, |data| data.len())
        )
    }
}
