#![no_std]
extern crate alloc;

pub use crate::archive::ArchiveSrc;
pub use crate::entry::{Entry, EntryKind};
pub use crate::error::Error;
pub use crate::field::{decode_octal, decode_text, Field, Kind, Value, LAYOUT};
pub use crate::header::Header;
pub use crate::mode::Mode;

mod archive;
mod entry;
mod error;
mod field;
mod header;
mod mode;

#[cfg(any(test, feature = "test"))]
pub mod test;

/// Alignment unit of both header blocks and payload regions
pub const BLOCK_SIZE: usize = 512;
/// Bytes of a header block covered by [`LAYOUT`]; the rest is reserved
pub const HEADER_SIZE: usize = 500;

/// Bytes of padding following a payload of `size` bytes
pub fn padding(size: u64) -> u64 {
    let block = BLOCK_SIZE as u64;
    (block - size % block) % block
}

/// Size of the payload region (payload plus padding) for a payload of `size` bytes
pub fn padded_size(size: u64) -> Result<u64, Error> {
    size.checked_add(padding(size)).ok_or(Error::Overflow)
}

#[cfg(test)]
mod tests {
    use crate::{padded_size, padding, BLOCK_SIZE, HEADER_SIZE, LAYOUT};

    #[test]
    fn layout_size() {
        let total: usize = LAYOUT.iter().map(|(_, len, _)| len).sum();
        assert_eq!(total, HEADER_SIZE);
        assert_eq!(BLOCK_SIZE - HEADER_SIZE, 12);
    }

    #[test]
    fn payload_alignment() {
        assert_eq!(padding(0), 0);
        assert_eq!(padding(1), 511);
        assert_eq!(padding(512), 0);
        assert_eq!(padding(513), 511);

        for size in [0, 1, 5, 511, 512, 513, 1024, 1500, 4096] {
            let expected = (size + 511) / 512 * 512;
            assert_eq!(padded_size(size).unwrap(), expected, "size {}", size);
        }
    }

    #[test]
    fn padded_size_overflow() {
        assert!(padded_size(u64::MAX).is_err());
    }
}
