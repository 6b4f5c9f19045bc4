#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ustar_core;

fuzz_target!(|data: &[u8]| {
    if let Ok(block) = <&[u8; 512]>::try_from(data) {
        let _result = ustar_core::Header::decode(block);
    }
});
