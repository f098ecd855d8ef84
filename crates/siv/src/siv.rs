//! SIV authenticated encryption (RFC 5297 §2.6 / §2.7).
//!
//! **Deterministic:** the same key, associated data and plaintext always
//! produce the same ciphertext. The synthetic IV doubles as the
//! authentication tag, so nonce reuse only reveals plaintext equality.
//!
//! # Key layout
//!
//! ```text
//! key = mac_key (first half) || ctr_key (second half)    32, 48 or 64 bytes
//! ```

use std::fmt;

use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroize;

use crate::block::{Aes, Block, BlockCipher, BLOCK_LEN};
use crate::cmac::Cmac;
use crate::ctr::apply_keystream;
use crate::error::SivError;
use crate::s2v::{collect_associated_data, s2v};

/// Length of the synthetic IV prepended to every ciphertext.
pub const IV_LEN: usize = BLOCK_LEN;

/// A keyed SIV instance over the block cipher `C` (AES by default).
///
/// Holds the expanded key schedules and the CMAC subkeys so repeated calls
/// under one key skip key setup. Safe to share across threads when `C` is.
#[derive(Clone)]
pub struct Siv<C = Aes> {
    mac: Cmac<C>,
    ctr: C,
}

impl Siv {
    /// Build an instance from a combined 32, 48 or 64-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`SivError::InvalidKeyLength`] for any other length.
    pub fn new(key: &[u8]) -> Result<Self, SivError> {
        if !matches!(key.len(), 32 | 48 | 64) {
            return Err(SivError::InvalidKeyLength(key.len()));
        }
        let (mac_key, ctr_key) = key.split_at(key.len() / 2);
        Self::from_split_keys(ctr_key, mac_key)
    }

    /// Build an instance from separately held CTR and MAC sub-keys.
    ///
    /// # Errors
    ///
    /// Returns [`SivError::SubkeyLengthMismatch`] if the halves differ in
    /// length, or [`SivError::InvalidKeyLength`] if they are not AES keys.
    pub fn from_split_keys(ctr_key: &[u8], mac_key: &[u8]) -> Result<Self, SivError> {
        if ctr_key.len() != mac_key.len() {
            return Err(SivError::SubkeyLengthMismatch {
                ctr: ctr_key.len(),
                mac: mac_key.len(),
            });
        }
        let mac = Aes::new(mac_key).map_err(|_| SivError::InvalidKeyLength(2 * mac_key.len()))?;
        let ctr = Aes::new(ctr_key).map_err(|_| SivError::InvalidKeyLength(2 * ctr_key.len()))?;
        Ok(Self::from_ciphers(ctr, mac))
    }

    /// AES key size in bits of each sub-key.
    pub fn key_bits(&self) -> usize {
        self.ctr.key_bits()
    }
}

impl<C: BlockCipher> Siv<C> {
    /// Build an instance from two already-keyed block ciphers.
    pub fn from_ciphers(ctr: C, mac: C) -> Self {
        Self {
            mac: Cmac::new(mac),
            ctr,
        }
    }

    /// Compute the synthetic IV `S2V(mac_key, associated_data..., plaintext)`.
    ///
    /// # Errors
    ///
    /// Returns [`SivError::TooManyAssociatedData`] for more than 126 fields.
    pub fn synthetic_iv<I, T>(&self, plaintext: &[u8], associated_data: I) -> Result<Block, SivError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        s2v(&self.mac, associated_data, plaintext)
    }

    /// Encrypt `plaintext`, authenticating each element of `associated_data`
    /// in order. Returns `V || C`, exactly [`IV_LEN`] bytes longer than the input.
    ///
    /// # Errors
    ///
    /// Returns [`SivError::TooManyAssociatedData`] for more than 126 fields.
    pub fn encrypt<I, T>(&self, plaintext: &[u8], associated_data: I) -> Result<Vec<u8>, SivError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let v = self.synthetic_iv(plaintext, associated_data)?;
        let mut out = Vec::with_capacity(IV_LEN + plaintext.len());
        out.extend_from_slice(&v);
        out.extend_from_slice(plaintext);
        apply_keystream(&self.ctr, &counter_block(&v), &mut out[IV_LEN..]);
        Ok(out)
    }

    /// Decrypt and authenticate `ciphertext` (`V || C`).
    ///
    /// # Errors
    ///
    /// - [`SivError::InvalidCiphertextLength`] if `ciphertext` is shorter than [`IV_LEN`].
    /// - [`SivError::TooManyAssociatedData`] for more than 126 fields.
    /// - [`SivError::AuthenticationFailure`] if the recomputed synthetic IV
    ///   differs (wrong key, tampered data or different associated data).
    pub fn decrypt<I, T>(&self, ciphertext: &[u8], associated_data: I) -> Result<Vec<u8>, SivError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        if ciphertext.len() < IV_LEN {
            return Err(SivError::InvalidCiphertextLength(ciphertext.len()));
        }
        let fields = collect_associated_data(associated_data)?;
        let (iv, payload) = ciphertext.split_at(IV_LEN);
        let mut v = [0u8; IV_LEN];
        v.copy_from_slice(iv);

        let mut plaintext = payload.to_vec();
        apply_keystream(&self.ctr, &counter_block(&v), &mut plaintext);

        let expected = s2v(&self.mac, &fields, &plaintext)?;
        if bool::from(expected[..].ct_eq(&v[..])) {
            Ok(plaintext)
        } else {
            plaintext.zeroize();
            debug!(payload_len = payload.len(), "synthetic IV mismatch");
            Err(SivError::AuthenticationFailure)
        }
    }
}

impl<C> fmt::Debug for Siv<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Siv")
            .field("mac", &self.mac)
            .field("ctr", &"[REDACTED]")
            .finish()
    }
}

/// Derive the CTR starting block `Q` from `V` by clearing the most significant
/// bit of bytes 8 and 12 (bits 63 and 31 of the 128-bit big-endian value).
fn counter_block(v: &Block) -> Block {
    let mut q = *v;
    q[8] &= 0x7f;
    q[12] &= 0x7f;
    q
}

/// One-shot SIV encryption under a combined 32, 48 or 64-byte key.
///
/// # Errors
///
/// Returns [`SivError::InvalidKeyLength`] if `key` is not a supported size,
/// then the errors of [`Siv::encrypt`].
pub fn encrypt<I, T>(key: &[u8], plaintext: &[u8], associated_data: I) -> Result<Vec<u8>, SivError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    Siv::new(key)?.encrypt(plaintext, associated_data)
}

/// One-shot SIV decryption under a combined 32, 48 or 64-byte key.
///
/// # Errors
///
/// Returns [`SivError::InvalidKeyLength`] first, then the errors of [`Siv::decrypt`].
pub fn decrypt<I, T>(key: &[u8], ciphertext: &[u8], associated_data: I) -> Result<Vec<u8>, SivError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    Siv::new(key)?.decrypt(ciphertext, associated_data)
}
