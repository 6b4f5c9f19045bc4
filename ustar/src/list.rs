use std::io::Write;

use ustar_core::Entry;

use crate::{wrap_io_err, Error};

/// Write the name of every entry, one per line, in archive order
pub fn list_names<'a, I, W>(entries: I, mut out: W) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a Entry>,
    W: Write,
{
    for entry in entries {
        writeln!(out, "{}", entry.name()).map_err(wrap_io_err!("Write entry name"))?;
    }
    out.flush().map_err(wrap_io_err!("Flush entry names"))
}
