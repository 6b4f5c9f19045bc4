#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ustar_core;

use ustar_core::ArchiveSrc;

fuzz_target!(|data: &[u8]| {
    let mut src = data;
    let _result = src.read_entries();
});
