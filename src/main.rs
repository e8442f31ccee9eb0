extern crate pelorus;

use std::io::{self, Read};

use pelorus::{decode, SentenceAssembler};

fn main() {
    let stdin = io::stdin();
    let mut assembler = SentenceAssembler::new();

    for byte in stdin.lock().bytes() {
        let byte = match byte {
            Ok(byte) => byte,
            Err(_) => break,
        };
        if assembler.consume(byte) {
            if let Some((lat, long)) = assembler.sentence().and_then(decode) {
                println!("{}, {}", lat, long);
            }
        }
    }
}
