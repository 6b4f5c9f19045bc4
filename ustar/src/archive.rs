use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::debug;
use ustar_core::{ArchiveSrc, Entry};

use crate::{wrap_io_err, Error};

/// Archive path meaning "read the archive from standard input"
pub const STDIN_PATH: &str = "-";

/// A ustar archive on disk
#[derive(Debug)]
pub struct ArchiveFile {
    path: PathBuf,
    src: BufReader<File>,
    /// Offset `src` is positioned at
    pos: u64,
}

impl ArchiveFile {
    pub fn open(path: impl AsRef<Path>) -> Result<ArchiveFile, Error> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .open(&path)
            .map_err(wrap_io_err!(path, "Open"))?;

        Ok(ArchiveFile {
            path,
            src: BufReader::new(file),
            pos: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArchiveSrc for ArchiveFile {
    type Err = Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        if offset != self.pos {
            self.src
                .seek(SeekFrom::Start(offset))
                .map_err(wrap_io_err!(self.path, "Seek at read_at"))?;
            self.pos = offset;
        }

        let mut count = 0;
        while count < buf.len() {
            match self.src.read(&mut buf[count..]) {
                Ok(0) => break,
                Ok(n) => count += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(Error::Io {
                        source,
                        path: Some(self.path.clone()),
                        context: "Read at read_at",
                    })
                }
            }
        }
        self.pos += count as u64;
        Ok(count)
    }
}

/// Collect every entry of the archive at `path`, or of standard input when
/// `path` is [`STDIN_PATH`]. The source is closed before this returns.
pub fn read_archive(path: impl AsRef<Path>) -> Result<Vec<Entry>, Error> {
    let path = path.as_ref();

    let entries = if path == Path::new(STDIN_PATH) {
        read_stream(io::stdin().lock())?
    } else {
        ArchiveFile::open(path)?.read_entries()?
    };

    debug!("read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Collect every entry of an archive arriving on a stream that cannot seek,
/// buffering it in memory first.
pub fn read_stream(mut stream: impl Read) -> Result<Vec<Entry>, Error> {
    let mut data = Vec::new();
    stream
        .read_to_end(&mut data)
        .map_err(wrap_io_err!("Read archive stream"))?;
    Ok(data.read_entries()?)
}
