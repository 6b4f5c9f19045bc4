use alloc::vec::Vec;

use log::debug;

use crate::{padded_size, Entry, Error, Header, BLOCK_SIZE};

/// Payloads are read in pieces of this size so that a bogus size field
/// runs into the end of the source before it can exhaust memory.
const READ_CHUNK_SIZE: usize = 64 * 1024;

pub trait ArchiveSrc {
    type Err: From<Error>;

    /// Fill `buf` from `offset`, returning fewer bytes only at the end of the source
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err>;

    /// Read exactly `size` bytes of payload starting at `offset`
    fn read_data(&mut self, offset: u64, size: u64) -> Result<Vec<u8>, Self::Err> {
        let len = usize::try_from(size).map_err(Error::from)?;
        offset.checked_add(size).ok_or(Error::Overflow)?;

        let mut data = Vec::with_capacity(len.min(READ_CHUNK_SIZE));
        while data.len() < len {
            let start = data.len();
            let end = len.min(start + READ_CHUNK_SIZE);
            data.resize(end, 0);

            let count = self.read_at(offset + start as u64, &mut data[start..end])?;
            if count < end - start {
                return Err(Error::Truncated {
                    offset,
                    expected: len,
                    actual: start + count,
                }
                .into());
            }
        }
        Ok(data)
    }

    /// Decode every member up to the end-of-archive marker or the end of
    /// the source, together with its payload.
    fn read_entries(&mut self) -> Result<Vec<Entry>, Self::Err> {
        let mut entries = Vec::new();
        let mut offset = 0u64;
        let mut block = [0; BLOCK_SIZE];

        loop {
            let count = self.read_at(offset, &mut block)?;
            if count == 0 {
                debug!("source exhausted at offset {}", offset);
                break;
            }
            if count < BLOCK_SIZE {
                return Err(Error::Truncated {
                    offset,
                    expected: BLOCK_SIZE,
                    actual: count,
                }
                .into());
            }

            let header = match Header::decode(&block)? {
                Some(header) => header,
                None => {
                    debug!("end of archive marker at offset {}", offset);
                    break;
                }
            };
            offset = offset
                .checked_add(BLOCK_SIZE as u64)
                .ok_or(Error::Overflow)?;

            let data = if header.size > 0 {
                Some(self.read_data(offset, header.size)?)
            } else {
                None
            };
            offset = offset
                .checked_add(padded_size(header.size)?)
                .ok_or(Error::Overflow)?;

            let entry = Entry { header, data };
            debug!("{}", entry);
            entries.push(entry);
        }

        Ok(entries)
    }
}

impl<T: AsRef<[u8]>> ArchiveSrc for T {
    type Err = Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        let data = self.as_ref();
        let start = usize::try_from(offset)?;
        if start >= data.len() {
            return Ok(0);
        }
        let end = start
            .checked_add(buf.len())
            .ok_or(Error::Overflow)?
            .min(data.len());
        let count = end - start;
        buf[..count].copy_from_slice(&data[start..end]);
        Ok(count)
    }
}
