use std::error::Error;
use std::fs;

use ustar_core::test::{ArchiveBuilder, HeaderBuilder};
use ustar_core::BLOCK_SIZE;

fn show_bytes(archive: &[u8]) -> Result<String, Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("test.tar");
    fs::write(&path, archive)?;

    let mut out = Vec::new();
    ustar::show(&path, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn lists_every_member() -> Result<(), Box<dyn Error>> {
    let archive = ArchiveBuilder::new()
        .entry(HeaderBuilder::new("usr/", b'5').build(), &[])
        .file("usr/readme", b"read me")
        .entry(HeaderBuilder::new("usr/link", b'2').linkname("readme").build(), &[])
        .entry(HeaderBuilder::new("dev/null", b'3').build(), &[])
        .finish();

    assert_eq!(show_bytes(&archive)?, "usr/\nusr/readme\nusr/link\ndev/null\n");
    Ok(())
}

#[test]
fn lone_terminator() -> Result<(), Box<dyn Error>> {
    assert_eq!(show_bytes(&[0; BLOCK_SIZE])?, "");
    Ok(())
}

#[test]
fn stops_at_first_terminator() -> Result<(), Box<dyn Error>> {
    let archive = ArchiveBuilder::new()
        .file("first", b"1")
        .raw(&[0; BLOCK_SIZE])
        .file("hidden", b"2")
        .finish();

    assert_eq!(show_bytes(&archive)?, "first\n");
    Ok(())
}

#[test]
fn truncated_archive() -> Result<(), Box<dyn Error>> {
    let archive = ArchiveBuilder::new()
        .entry(HeaderBuilder::new("big", b'0').size(4096).build(), b"short")
        .into_inner();

    let err = show_bytes(&archive).unwrap_err();
    let err = err.downcast::<ustar::Error>()?;
    assert!(matches!(
        *err,
        ustar::Error::Core(ustar_core::Error::Truncated { expected: 4096, .. })
    ));
    Ok(())
}
