//! Decoded form of a ustar header block
use alloc::string::String;
use core::fmt::{self, Display};

use crate::{EntryKind, Error, Field, Mode, Value, BLOCK_SIZE, HEADER_SIZE, LAYOUT};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Path of the member, relative to `prefix` when that is set
    pub name: String,
    /// Permission bits as stored in the archive
    pub mode: u64,
    pub uid: u64,
    pub gid: u64,
    /// Length of the payload following the header
    pub size: u64,
    /// Modification time in seconds since the epoch
    pub mtime: u64,
    /// Stored header checksum. It is never compared against the block.
    pub checksum: u64,
    /// Entry type; NUL when the archive left the byte empty
    pub typeflag: char,
    /// Link target for hard and symbolic links
    pub linkname: String,
    pub magic: String,
    pub version: [u8; 2],
    pub uname: String,
    pub gname: String,
    pub devmajor: u64,
    pub devminor: u64,
    /// Leading path segment for names longer than the name field
    pub prefix: String,
}

impl Header {
    /// Decode a header block. Returns `None` for the end-of-archive marker,
    /// which is any block whose name field is empty.
    pub fn decode(block: &[u8; BLOCK_SIZE]) -> Result<Option<Header>, Error> {
        let mut header = Header::default();
        let mut cursor = 0;
        for &(field, len, kind) in LAYOUT.iter() {
            let raw = &block[cursor..cursor + len];
            cursor += len;

            header.assign(field, kind.decode(field, raw)?)?;
            if field == Field::Name && header.name.is_empty() {
                return Ok(None);
            }
        }
        debug_assert_eq!(cursor, HEADER_SIZE);
        Ok(Some(header))
    }

    fn assign(&mut self, field: Field, value: Value) -> Result<(), Error> {
        match (field, value) {
            (Field::Name, Value::Text(text)) => self.name = text,
            (Field::Mode, Value::Number(n)) => self.mode = n,
            (Field::Uid, Value::Number(n)) => self.uid = n,
            (Field::Gid, Value::Number(n)) => self.gid = n,
            (Field::Size, Value::Number(n)) => self.size = n,
            (Field::Mtime, Value::Number(n)) => self.mtime = n,
            (Field::Checksum, Value::Number(n)) => self.checksum = n,
            (Field::Typeflag, Value::Text(text)) => {
                self.typeflag = text.chars().next().unwrap_or('\0')
            }
            (Field::Linkname, Value::Text(text)) => self.linkname = text,
            (Field::Magic, Value::Text(text)) => self.magic = text,
            (Field::Version, Value::Raw(raw)) => {
                self.version = raw.as_slice().try_into().map_err(|_| Error::Layout(field))?
            }
            (Field::Uname, Value::Text(text)) => self.uname = text,
            (Field::Gname, Value::Text(text)) => self.gname = text,
            (Field::Devmajor, Value::Number(n)) => self.devmajor = n,
            (Field::Devminor, Value::Number(n)) => self.devminor = n,
            (Field::Prefix, Value::Text(text)) => self.prefix = text,
            (field, _) => return Err(Error::Layout(field)),
        }
        Ok(())
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::from(self.typeflag)
    }

    /// Permission bits, with any file type bits dropped
    pub fn mode(&self) -> Mode {
        Mode::from_header(self.mode)
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name={:?} prefix={:?} type={:?} size={} mode={:o} uid={} gid={} mtime={}",
            self.name,
            self.prefix,
            self.typeflag,
            self.size,
            self.mode,
            self.uid,
            self.gid,
            self.mtime
        )
    }
}
