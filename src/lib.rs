#[cfg(test)]
#[macro_use]
extern crate assert_matches;
extern crate arrayvec;
extern crate chrono;
#[macro_use]
extern crate quick_error;

pub mod err;

pub mod assembler;
pub mod decoder;

pub use assembler::{ParseState, SentenceAssembler};
pub use decoder::{decode, RmcSentence};
pub use err::{CoordinateParseError, DecodeError};
