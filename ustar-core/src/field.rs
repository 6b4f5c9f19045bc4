//! Declarative layout of a ustar header block
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;
use core::str;

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Mode,
    Uid,
    Gid,
    Size,
    Mtime,
    Checksum,
    Typeflag,
    Linkname,
    Magic,
    Version,
    Uname,
    Gname,
    Devmajor,
    Devminor,
    Prefix,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Mode => "mode",
            Field::Uid => "uid",
            Field::Gid => "gid",
            Field::Size => "size",
            Field::Mtime => "mtime",
            Field::Checksum => "checksum",
            Field::Typeflag => "typeflag",
            Field::Linkname => "linkname",
            Field::Magic => "magic",
            Field::Version => "version",
            Field::Uname => "uname",
            Field::Gname => "gname",
            Field::Devmajor => "devmajor",
            Field::Devminor => "devminor",
            Field::Prefix => "prefix",
        }
    }

    /// Byte range of this field within a header block
    pub fn span(&self) -> Range<usize> {
        let mut start = 0;
        for (field, len, _) in LAYOUT.iter() {
            if field == self {
                return start..start + len;
            }
            start += len;
        }
        // Every variant appears in LAYOUT
        start..start
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the bytes of a field are turned into a [`Value`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Octal,
    /// Octal, with trailing spaces ignored as well as NULs
    Checksum,
    Text,
    Raw,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Number(u64),
    Text(String),
    Raw(Vec<u8>),
}

/// Field order, length and decoding of a ustar header, starting at offset 0.
/// The 12 bytes following the last field are reserved.
pub const LAYOUT: [(Field, usize, Kind); 16] = [
    (Field::Name, 100, Kind::Text),
    (Field::Mode, 8, Kind::Octal),
    (Field::Uid, 8, Kind::Octal),
    (Field::Gid, 8, Kind::Octal),
    (Field::Size, 12, Kind::Octal),
    (Field::Mtime, 12, Kind::Octal),
    (Field::Checksum, 8, Kind::Checksum),
    (Field::Typeflag, 1, Kind::Text),
    (Field::Linkname, 100, Kind::Text),
    (Field::Magic, 6, Kind::Text),
    (Field::Version, 2, Kind::Raw),
    (Field::Uname, 32, Kind::Text),
    (Field::Gname, 32, Kind::Text),
    (Field::Devmajor, 8, Kind::Octal),
    (Field::Devminor, 8, Kind::Octal),
    (Field::Prefix, 155, Kind::Text),
];

impl Kind {
    pub fn decode(self, field: Field, raw: &[u8]) -> Result<Value, Error> {
        match self {
            Kind::Octal => decode_octal(field, raw).map(Value::Number),
            Kind::Checksum => {
                let end = raw
                    .iter()
                    .rposition(|b| *b != b' ' && *b != 0)
                    .map_or(0, |i| i + 1);
                decode_octal(field, &raw[..end]).map(Value::Number)
            }
            Kind::Text => decode_text(field, raw).map(Value::Text),
            Kind::Raw => Ok(Value::Raw(raw.to_vec())),
        }
    }
}

fn trim_nul(raw: &[u8]) -> &[u8] {
    let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    &raw[..end]
}

fn as_str(field: Field, raw: &[u8]) -> Result<&str, Error> {
    str::from_utf8(trim_nul(raw)).map_err(|source| Error::InvalidText { field, source })
}

/// Decode a NUL padded UTF-8 field
pub fn decode_text(field: Field, raw: &[u8]) -> Result<String, Error> {
    as_str(field, raw).map(String::from)
}

/// Decode a NUL padded octal field. Leading zeros are ignored and a field
/// with no digits left decodes to 0.
pub fn decode_octal(field: Field, raw: &[u8]) -> Result<u64, Error> {
    let text = as_str(field, raw)?;
    let digits = text.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }

    let invalid = || Error::InvalidOctal {
        field,
        value: String::from(text),
    };
    if !digits.bytes().all(|b| matches!(b, b'0'..=b'7')) {
        return Err(invalid());
    }
    u64::from_str_radix(digits, 8).map_err(|_| invalid())
}
