use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{list_names, read_archive, Error, Extractor, PathFilter};

/// Settings for [`extract`]
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Directory to extract into; created if missing
    pub output_dir: PathBuf,
    /// Only extract entries at or below this archive path
    pub subtree: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for ExtractOptions {
    fn default() -> ExtractOptions {
        ExtractOptions {
            output_dir: PathBuf::from("."),
            subtree: None,
            verbose: false,
        }
    }
}

/// Extract the archive at `archive_path` as described by `options`,
/// returning the number of entries extracted.
pub fn extract(archive_path: impl AsRef<Path>, options: &ExtractOptions) -> Result<usize, Error> {
    let entries = read_archive(archive_path)?;

    let filter = PathFilter::new(options.subtree.as_deref());
    let extractor = Extractor::new(&options.output_dir).verbose(options.verbose);
    extractor.prepare(&filter)?;
    extractor.extract_all(&entries, &filter)
}

/// Write the member names of the archive at `archive_path` to `out`
pub fn show(archive_path: impl AsRef<Path>, out: impl Write) -> Result<(), Error> {
    let entries = read_archive(archive_path)?;
    list_names(&entries, out)
}
