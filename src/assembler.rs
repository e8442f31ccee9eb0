//! Streaming assembly of *NMEA 0183* sentences, one byte at a time.

use arrayvec::ArrayVec;

use std::str;

/// A sentence is at most 82 characters between the starting delimiter and
/// the terminating <CR><LF>; one slot is reserved for the terminator.
const SENTENCE_CAPACITY: usize = 83;

/// Value stored in place of the CR/LF that completed the sentence.
const TERMINATOR: u8 = 0;

/// States of sentence assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No sentence in progress; waiting for a start delimiter.
    Invalid,
    /// Reading the talker and formatter identifier.
    Address,
    /// Reading comma separated fields.
    FieldData,
    /// High nibble of a hex escaped field byte. Never entered: the byte
    /// that would introduce an escape is not part of the recognized
    /// character set.
    FieldDataEscapeHi,
    /// Low nibble of a hex escaped field byte. Never entered, see above.
    FieldDataEscapeLo,
    /// Expecting the high checksum digit.
    ChecksumHi,
    /// Expecting the low checksum digit.
    ChecksumLo,
    /// Checksum matched; waiting for CR or LF.
    EndOfSentence,
    /// A complete sentence is available.
    Accepted,
}

/// Buffer bookkeeping requested by a transition.
enum Effect {
    /// Abandon everything and return to `Invalid`.
    Reset,
    /// Clear the sentence counters and store the start delimiter.
    Restart,
    /// Store the byte.
    Append,
    /// Store the byte and record a field boundary.
    AppendField,
    /// Consume the byte without touching the buffer.
    Ignore,
    /// Store the substituted terminator; the sentence is complete.
    Emit,
}

/// Hex digit for `nibble` as it appears on the wire (uppercase only).
#[inline]
fn to_hex(nibble: u8) -> u8 {
    let nibble = nibble & 0x0f;
    if nibble > 9 {
        nibble - 10 + b'A'
    } else {
        nibble + b'0'
    }
}

/// The transition table of the assembler.
///
/// Pure with respect to the buffer: the returned effect tells `consume`
/// what to do with the byte. `checksum` is only inspected to match the
/// transmitted checksum digits.
fn transition(state: ParseState, c: u8, checksum: u8) -> (ParseState, Effect) {
    // High-bit and control bytes never occur inside a sentence; CR or LF
    // after a matching checksum completes it.
    if c & 0x80 != 0 || c < 0x20 {
        return if state == ParseState::EndOfSentence && (c == b'\r' || c == b'\n') {
            (ParseState::Accepted, Effect::Emit)
        } else {
            (ParseState::Invalid, Effect::Reset)
        };
    }

    match c {
        b'$' | b'!' => (ParseState::Address, Effect::Restart),
        b'*' => match state {
            ParseState::Address | ParseState::FieldData => (ParseState::ChecksumHi, Effect::Append),
            _ => (ParseState::Invalid, Effect::Reset),
        },
        b',' => match state {
            ParseState::Address | ParseState::FieldData => {
                (ParseState::FieldData, Effect::AppendField)
            }
            _ => (ParseState::Invalid, Effect::Reset),
        },
        // Reserved for future use by the protocol.
        b'\\' | b'~' | 0x7f => (ParseState::Invalid, Effect::Reset),
        _ => match state {
            ParseState::Address if c.is_ascii_uppercase() || c.is_ascii_digit() => {
                (ParseState::Address, Effect::Append)
            }
            ParseState::FieldDataEscapeHi if c.is_ascii_hexdigit() => {
                (ParseState::FieldDataEscapeLo, Effect::Append)
            }
            ParseState::FieldDataEscapeLo if c.is_ascii_hexdigit() => {
                (ParseState::FieldData, Effect::Append)
            }
            ParseState::ChecksumHi if c == to_hex(checksum >> 4) => {
                (ParseState::ChecksumLo, Effect::Append)
            }
            ParseState::ChecksumLo if c == to_hex(checksum & 0x0f) => {
                (ParseState::EndOfSentence, Effect::Append)
            }
            ParseState::Invalid => (ParseState::Invalid, Effect::Ignore),
            ParseState::FieldData | ParseState::EndOfSentence => (state, Effect::Append),
            _ => (ParseState::Invalid, Effect::Reset),
        },
    }
}

/// Builds NMEA 0183 sentences from a raw byte stream.
///
/// Bytes go in one at a time through `consume`; once it returns `true` the
/// checksum validated sentence can be taken with `sentence`. The completed
/// sentence only survives until the next byte is consumed, so callers must
/// pick it up immediately.
///
/// Malformed input is never an error: the assembler drops the sentence in
/// progress, returns to its initial state and waits for the next start
/// delimiter.
#[derive(Debug)]
pub struct SentenceAssembler {
    state: ParseState,
    /// Whether appended bytes are folded into the checksum. On from the
    /// first valid address character, off from the checksum delimiter.
    update_checksum: bool,
    sentence: ArrayVec<[u8; SENTENCE_CAPACITY]>,
    fields: u8,
    checksum: u8,
}

impl SentenceAssembler {
    pub fn new() -> Self {
        SentenceAssembler {
            state: ParseState::Invalid,
            update_checksum: false,
            sentence: ArrayVec::new(),
            fields: 0,
            checksum: 0,
        }
    }

    /// Feed one byte. Returns `true` iff this byte completed a sentence.
    pub fn consume(&mut self, byte: u8) -> bool {
        if self.state == ParseState::Accepted {
            // The previous sentence was never picked up; discard it.
            self.reset();
        }

        let (state, effect) = transition(self.state, byte, self.checksum);
        self.state = state;

        match effect {
            Effect::Reset => self.reset(),
            Effect::Ignore => (),
            Effect::Restart => {
                self.sentence.clear();
                self.fields = 0;
                self.checksum = 0;
                self.push(byte);
            }
            Effect::Append => {
                match self.state {
                    // First address character opens the checksummed region.
                    ParseState::Address => self.update_checksum = true,
                    // The delimiter itself is no longer covered.
                    ParseState::ChecksumHi => self.update_checksum = false,
                    _ => (),
                }
                self.push(byte);
            }
            Effect::AppendField => {
                self.fields += 1;
                self.push(byte);
            }
            Effect::Emit => self.push(TERMINATOR),
        }

        self.state == ParseState::Accepted
    }

    /// The completed sentence without the checksum trailer and terminator.
    /// Only available while the assembler sits in `Accepted`.
    pub fn sentence(&self) -> Option<&str> {
        if self.state != ParseState::Accepted {
            return None;
        }
        let buf = self.sentence.as_slice();
        // An accepted sentence holds exactly one checksum delimiter.
        let content = match buf.iter().rposition(|&b| b == b'*') {
            Some(star) => &buf[..star],
            None => return None,
        };
        str::from_utf8(content).ok()
    }

    /// Current state, for diagnostics.
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Number of field boundaries seen in the current sentence.
    pub fn fields(&self) -> u8 {
        self.fields
    }

    /// Return to the initial state, discarding any sentence in progress.
    pub fn reset(&mut self) {
        self.state = ParseState::Invalid;
        self.update_checksum = false;
        self.sentence.clear();
        self.fields = 0;
        self.checksum = 0;
    }

    /// Store a byte, fold it into the checksum while the checksummed region
    /// is open, and abandon the sentence if it would outgrow the buffer.
    fn push(&mut self, byte: u8) {
        if self.sentence.try_push(byte).is_err() {
            self.reset();
            return;
        }
        if self.update_checksum {
            self.checksum ^= byte;
        }
        if self.sentence.len() == SENTENCE_CAPACITY - 1 && self.state != ParseState::Accepted {
            self.reset();
        }
    }
}

impl Default for SentenceAssembler {
    fn default() -> Self {
        SentenceAssembler::new()
    }
}
