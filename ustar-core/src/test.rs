//! Builders for ustar archives, for use in tests
use alloc::format;
use alloc::vec::Vec;

use crate::{padding, Field, BLOCK_SIZE};

/// Writes a single ustar header block, field by field
#[derive(Clone)]
pub struct HeaderBuilder {
    block: [u8; BLOCK_SIZE],
}

impl HeaderBuilder {
    /// A header with mode 0644, owner 0:0, mtime 0 and the ustar magic
    pub fn new(name: &str, typeflag: u8) -> HeaderBuilder {
        HeaderBuilder {
            block: [0; BLOCK_SIZE],
        }
        .raw(Field::Name, name.as_bytes())
        .raw(Field::Typeflag, &[typeflag])
        .raw(Field::Magic, b"ustar\0")
        .raw(Field::Version, b"00")
        .mode(0o644)
        .uid(0)
        .gid(0)
        .size(0)
        .mtime(0)
        .octal(Field::Devmajor, 0)
        .octal(Field::Devminor, 0)
    }

    /// Overwrite a field with `bytes`, NUL padding the rest of it
    pub fn raw(mut self, field: Field, bytes: &[u8]) -> HeaderBuilder {
        let dest = &mut self.block[field.span()];
        dest.fill(0);
        let len = bytes.len().min(dest.len());
        dest[..len].copy_from_slice(&bytes[..len]);
        self
    }

    /// Write `value` as zero padded octal followed by a NUL
    pub fn octal(self, field: Field, value: u64) -> HeaderBuilder {
        let width = field.span().len() - 1;
        let text = format!("{:0width$o}", value, width = width);
        self.raw(field, text.as_bytes())
    }

    pub fn mode(self, mode: u64) -> HeaderBuilder {
        self.octal(Field::Mode, mode)
    }

    pub fn uid(self, uid: u64) -> HeaderBuilder {
        self.octal(Field::Uid, uid)
    }

    pub fn gid(self, gid: u64) -> HeaderBuilder {
        self.octal(Field::Gid, gid)
    }

    pub fn size(self, size: u64) -> HeaderBuilder {
        self.octal(Field::Size, size)
    }

    pub fn mtime(self, mtime: u64) -> HeaderBuilder {
        self.octal(Field::Mtime, mtime)
    }

    pub fn linkname(self, linkname: &str) -> HeaderBuilder {
        self.raw(Field::Linkname, linkname.as_bytes())
    }

    pub fn uname(self, uname: &str) -> HeaderBuilder {
        self.raw(Field::Uname, uname.as_bytes())
    }

    pub fn gname(self, gname: &str) -> HeaderBuilder {
        self.raw(Field::Gname, gname.as_bytes())
    }

    pub fn prefix(self, prefix: &str) -> HeaderBuilder {
        self.raw(Field::Prefix, prefix.as_bytes())
    }

    /// Finish the block with a standard checksum: the byte sum of the block
    /// with the checksum field counted as spaces.
    pub fn build(self) -> [u8; BLOCK_SIZE] {
        let mut block = self.raw(Field::Checksum, b"        ").block;
        let sum: u64 = block.iter().map(|b| u64::from(*b)).sum();
        let text = format!("{:06o}\0 ", sum);
        block[Field::Checksum.span()].copy_from_slice(text.as_bytes());
        block
    }
}

/// Concatenates header blocks and padded payloads
#[derive(Clone, Default)]
pub struct ArchiveBuilder {
    bytes: Vec<u8>,
}

impl ArchiveBuilder {
    pub fn new() -> ArchiveBuilder {
        ArchiveBuilder::default()
    }

    /// Append a header block followed by `data` and its padding. The size
    /// field of `header` is left as built.
    pub fn entry(mut self, header: [u8; BLOCK_SIZE], data: &[u8]) -> ArchiveBuilder {
        self.bytes.extend_from_slice(&header);
        self.bytes.extend_from_slice(data);
        let pad = padding(data.len() as u64) as usize;
        self.bytes.resize(self.bytes.len() + pad, 0);
        self
    }

    /// Append a regular file with mode 0644
    pub fn file(self, name: &str, data: &[u8]) -> ArchiveBuilder {
        let header = HeaderBuilder::new(name, b'0')
            .size(data.len() as u64)
            .build();
        self.entry(header, data)
    }

    /// Append bytes verbatim
    pub fn raw(mut self, bytes: &[u8]) -> ArchiveBuilder {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// The archive so far, without an end-of-archive marker
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    /// The archive terminated by two zero blocks
    pub fn finish(self) -> Vec<u8> {
        self.raw(&[0; 2 * BLOCK_SIZE]).bytes
    }
}
