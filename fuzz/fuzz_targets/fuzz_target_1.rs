#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate pelorus;

use pelorus::{decode, SentenceAssembler};

fuzz_target!(|data: &[u8]| {
    let mut assembler = SentenceAssembler::new();
    for &byte in data {
        if assembler.consume(byte) {
            let _ = assembler.sentence().and_then(decode);
        }
    }
});
