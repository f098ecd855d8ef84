//! Error types for the SIV primitive and the test-vector codec.

use thiserror::Error;

/// Errors produced by the SIV layer.
///
/// Every variant is terminal for the call: no partial plaintext is ever
/// returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SivError {
    /// The key is not 32, 48 or 64 bytes (or a sub-key is not 16, 24 or 32).
    #[error("invalid key length: {0} bytes")]
    InvalidKeyLength(usize),

    /// Separately supplied CTR and MAC sub-keys differ in length.
    #[error("sub-key length mismatch: ctr key {ctr} bytes, mac key {mac} bytes")]
    SubkeyLengthMismatch { ctr: usize, mac: usize },

    /// The ciphertext is too short to hold the synthetic IV.
    #[error("invalid ciphertext length: {0} bytes is shorter than the 16-byte synthetic IV")]
    InvalidCiphertextLength(usize),

    /// More associated-data fields than S2V can absorb (at most 126).
    #[error("too many associated data fields: {0} (at most 126)")]
    TooManyAssociatedData(usize),

    /// The recomputed synthetic IV does not match the one in the ciphertext.
    #[error("authentication failed")]
    AuthenticationFailure,
}

/// Errors produced while parsing or checking a test vector line.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The line ended before the named field.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field was not valid hex.
    #[error("invalid hex in field {field}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// The associated-data count was not a decimal integer.
    #[error("invalid associated data count: {0:?}")]
    InvalidCount(String),

    /// The line had fields left over after the ciphertext.
    #[error("unexpected trailing fields: {0}")]
    TrailingFields(usize),

    /// Encrypting the recorded inputs did not reproduce the recorded ciphertext.
    #[error("ciphertext mismatch")]
    CiphertextMismatch,

    /// Decrypting the recorded ciphertext did not return the recorded plaintext.
    #[error("decrypted plaintext mismatch")]
    PlaintextMismatch,

    /// The primitive rejected the recorded inputs.
    #[error(transparent)]
    Siv(#[from] SivError),
}
