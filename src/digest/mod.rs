//! Digest engine
//!
//! Streams asset bytes through the selected SHA-2 function and encodes the
//! raw digest as standard, padded base64.

mod hasher;

pub use hasher::{compute_digest, digest_reader, READ_BUFFER_SIZE};
