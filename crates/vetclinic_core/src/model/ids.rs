//! Identifier and receipt number generation.
//!
//! # Invariants
//! - Ids are two uppercase ASCII letters followed by six ASCII digits.
//! - Receipt numbers lie in `0..=RECEIPT_NO_MAX`.
//! - Draws are uniform and independent. Nothing here guarantees uniqueness and
//!   nothing retries on collision.

use super::record::RecordId;
use rand::rngs::ThreadRng;
use rand::Rng;

pub const ID_LETTERS: usize = 2;
pub const ID_DIGITS: usize = 6;

/// Receipt numbers have at most ten digits.
pub const RECEIPT_NO_MAX: u64 = 9_999_999_999;

pub type ReceiptNo = u64;

/// Supplies fresh identifiers to the lifecycle service.
pub trait IdSource {
    fn next_id(&mut self) -> RecordId;
    fn next_receipt_no(&mut self) -> ReceiptNo;
}

/// Random [`IdSource`] over any `rand` generator.
#[derive(Debug, Clone)]
pub struct IdGenerator<R = ThreadRng> {
    rng: R,
}

impl IdGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for IdGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> IdGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IdSource for IdGenerator<R> {
    fn next_id(&mut self) -> RecordId {
        let mut id = String::with_capacity(ID_LETTERS + ID_DIGITS);
        for _ in 0..ID_LETTERS {
            id.push(char::from(self.rng.gen_range(b'A'..=b'Z')));
        }
        for _ in 0..ID_DIGITS {
            id.push(char::from(self.rng.gen_range(b'0'..=b'9')));
        }
        RecordId::new(id)
    }

    fn next_receipt_no(&mut self) -> ReceiptNo {
        self.rng.gen_range(0..=RECEIPT_NO_MAX)
    }
}

/// Whether `value` has the generated id shape.
pub fn is_generated_id(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == ID_LETTERS + ID_DIGITS
        && bytes[..ID_LETTERS].iter().all(u8::is_ascii_uppercase)
        && bytes[ID_LETTERS..].iter().all(u8::is_ascii_digit)
}
