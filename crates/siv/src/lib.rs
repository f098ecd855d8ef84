//! AES-SIV (RFC 5297) deterministic authenticated encryption.
//!
//! The crate is layered leaf-first:
//!
//! - [`block`]: the [`BlockCipher`] capability, AES key selection and the
//!   GF(2^128) doubling helper.
//! - [`cmac`]: CMAC (RFC 4493) over any [`BlockCipher`].
//! - [`s2v`]: the String-to-Vector construction producing the synthetic IV.
//! - [`ctr`]: CTR keystream application.
//! - [`siv`](mod@siv): key splitting plus the `encrypt` / `decrypt` operations.
//! - [`vector`]: the semicolon-delimited conformance test-vector record.
//!
//! # Ciphertext format
//!
//! ```text
//! V (16-byte synthetic IV) || CTR(ctr_key, V with bits 63 and 31 cleared, plaintext)
//! ```

pub mod block;
pub mod cmac;
pub mod ctr;
pub mod error;
pub mod s2v;
pub mod siv;
pub mod vector;

pub use block::{Aes, BlockCipher, BLOCK_LEN};
pub use crate::cmac::{cmac, Cmac};
pub use error::{SivError, VectorError};
pub use s2v::{s2v, MAX_ASSOCIATED_DATA};
pub use siv::{decrypt, encrypt, Siv, IV_LEN};
pub use vector::TestVector;
