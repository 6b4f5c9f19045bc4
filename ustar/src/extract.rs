use std::fs::{self, DirBuilder, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{lchown, symlink, DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use log::{debug, log, Level};
use rustix::fs::{utimensat, AtFlags, OFlags, Timespec, Timestamps, CWD};
use ustar_core::{Entry, EntryKind, Header, Mode};

use crate::ext::{check_relative, HeaderExt};
use crate::{wrap_io_err, Error, PathFilter};

/// Materializes archive entries below a base directory.
///
/// Entries are written in place, one after the other. A failure leaves the
/// entries before it on disk.
#[derive(Clone, Debug)]
pub struct Extractor {
    base_dir: PathBuf,
    privileged: bool,
    verbose: bool,
}

impl Extractor {
    /// Ownership is restored when the effective user is root
    pub fn new(base_dir: impl AsRef<Path>) -> Extractor {
        Extractor {
            base_dir: base_dir.as_ref().to_path_buf(),
            privileged: rustix::process::geteuid().is_root(),
            verbose: false,
        }
    }

    /// Whether to set owner and group from the archive
    pub fn privileged(mut self, privileged: bool) -> Extractor {
        self.privileged = privileged;
        self
    }

    /// Log each extracted entry at info level instead of debug
    pub fn verbose(mut self, verbose: bool) -> Extractor {
        self.verbose = verbose;
        self
    }

    /// Create the base directory, and the directories leading up to the
    /// filter's subtree, which the filter itself never lets through.
    pub fn prepare(&self, filter: &PathFilter) -> Result<(), Error> {
        let mut dir = self.base_dir.clone();
        if let Some(parent) = filter.subtree_path().and_then(Path::parent) {
            dir.push(check_relative(parent)?);
        }
        fs::create_dir_all(&dir).map_err(wrap_io_err!(dir, "Create directory"))
    }

    /// Extract, in order, the entries `filter` includes. Stops at the first
    /// failure. Returns the number of entries extracted.
    pub fn extract_all<'a, I>(&self, entries: I, filter: &PathFilter) -> Result<usize, Error>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        if !self.privileged {
            debug!("not privileged, ownership will not be restored");
        }

        let mut count = 0;
        for entry in entries {
            if !filter.includes(&entry.header) {
                debug!("skipping {}", entry.header.path().display());
                continue;
            }
            self.extract(entry)?;
            count += 1;
        }
        Ok(count)
    }

    /// Create the filesystem object for `entry` and restore its metadata.
    /// Returns the path that was written.
    pub fn extract(&self, entry: &Entry) -> Result<PathBuf, Error> {
        let relative = entry.header.check_path()?;
        self.check_ancestors(&relative)?;
        let target = self.base_dir.join(&relative);
        let mode = entry.mode();
        let kind = entry.kind();

        match kind {
            EntryKind::Directory => create_dir(&target, mode)?,
            EntryKind::RegularFile => {
                let data: &[u8] = match (entry.data(), entry.header.size) {
                    (Some(data), _) => data,
                    (None, 0) => &[],
                    (None, size) => {
                        return Err(Error::MissingData {
                            entry: relative,
                            size,
                        })
                    }
                };
                write_file(&target, data, mode)?;
            }
            EntryKind::HardLink => {
                let linkname = check_relative(Path::new(&entry.header.linkname))?;
                self.check_ancestors(linkname)?;
                let source = self.base_dir.join(linkname);
                fs::hard_link(&source, &target).map_err(wrap_io_err!(target, "Hard link"))?;
            }
            EntryKind::SymbolicLink => {
                symlink(&entry.header.linkname, &target)
                    .map_err(wrap_io_err!(target, "Symlink"))?;
            }
            EntryKind::Unsupported(typeflag) => {
                return Err(Error::UnsupportedEntry {
                    entry: relative,
                    typeflag,
                });
            }
        }

        self.restore_metadata(&entry.header, &target, kind)?;

        let level = if self.verbose {
            Level::Info
        } else {
            Level::Debug
        };
        log!(level, "{}", relative.display());
        Ok(target)
    }

    /// Fail if a directory between the base directory and `relative` is a
    /// symlink, as one extracted earlier could point outside the base.
    fn check_ancestors(&self, relative: &Path) -> Result<(), Error> {
        let mut dir = self.base_dir.clone();
        let mut prefix = PathBuf::new();
        let parents = match relative.parent() {
            Some(parent) => parent,
            None => return Ok(()),
        };
        for component in parents.components() {
            dir.push(component);
            prefix.push(component);
            match fs::symlink_metadata(&dir) {
                Ok(metadata) if metadata.file_type().is_symlink() => {
                    return Err(Error::InvalidPath {
                        entry: relative.to_path_buf(),
                        component: prefix,
                    });
                }
                Ok(_) => {}
                // Nothing below a missing directory can be a link
                Err(err) if err.kind() == io::ErrorKind::NotFound => break,
                Err(source) => {
                    return Err(Error::Io {
                        source,
                        path: Some(dir),
                        context: "Inspect directory",
                    })
                }
            }
        }
        Ok(())
    }

    fn restore_metadata(&self, header: &Header, target: &Path, kind: EntryKind) -> Result<(), Error> {
        if self.privileged {
            let invalid = || Error::InvalidOwner {
                entry: target.to_path_buf(),
                uid: header.uid,
                gid: header.gid,
            };
            let uid = u32::try_from(header.uid).map_err(|_| invalid())?;
            let gid = u32::try_from(header.gid).map_err(|_| invalid())?;
            lchown(target, Some(uid), Some(gid)).map_err(wrap_io_err!(target, "Change owner"))?;
        }

        // Linux has no way to set the mode of the link itself
        if kind != EntryKind::SymbolicLink {
            fs::set_permissions(target, Permissions::from_mode(header.mode().bits()))
                .map_err(wrap_io_err!(target, "Set permissions"))?;
        }

        let mtime = Timespec {
            tv_sec: i64::try_from(header.mtime).map_err(ustar_core::Error::from)?,
            tv_nsec: 0,
        };
        let times = Timestamps {
            last_access: mtime,
            last_modification: mtime,
        };
        utimensat(CWD, target, &times, AtFlags::SYMLINK_NOFOLLOW)
            .map_err(io::Error::from)
            .map_err(wrap_io_err!(target, "Set times"))?;
        Ok(())
    }
}

/// Succeeds when `target` already is a directory
fn create_dir(target: &Path, mode: Mode) -> Result<(), Error> {
    let is_dir = || {
        fs::symlink_metadata(target)
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    };
    let result = match DirBuilder::new().mode(mode.bits()).create(target) {
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && is_dir() => Ok(()),
        result => result,
    };
    result.map_err(wrap_io_err!(target, "Create directory"))
}

fn write_file(target: &Path, data: &[u8], mode: Mode) -> Result<(), Error> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode.bits())
        .custom_flags(OFlags::NOFOLLOW.bits() as i32)
        .open(target)
        .map_err(wrap_io_err!(target, "Create file"))?;
    file.write_all(data)
        .map_err(wrap_io_err!(target, "Write file"))
}
