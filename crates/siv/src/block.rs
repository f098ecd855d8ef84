//! Block cipher capability and 128-bit block helpers shared by CMAC and S2V.
//!
//! Every higher layer is written against [`BlockCipher`], so any conforming
//! 128-bit block cipher can be plugged in. [`Aes`] is the runtime-selected
//! AES implementation used by [`crate::Siv`].

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::SivError;

/// Cipher block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// A single cipher block.
pub type Block = [u8; BLOCK_LEN];

/// Reduction constant for doubling in GF(2^128).
const DBL_RB: u128 = 0x87;

/// A keyed 128-bit block cipher that can encrypt one block in place.
///
/// Implementations must not branch on secret data.
#[cfg_attr(test, mockall::automock)]
pub trait BlockCipher {
    /// Encrypt `block` in place.
    fn encrypt_block(&self, block: &mut Block);
}

macro_rules! impl_block_cipher {
    ($($ty:ty),+) => {
        $(
            impl BlockCipher for $ty {
                fn encrypt_block(&self, block: &mut Block) {
                    BlockEncrypt::encrypt_block(self, GenericArray::from_mut_slice(block));
                }
            }
        )+
    };
}

impl_block_cipher!(Aes128, Aes192, Aes256);

/// AES with the key size chosen at runtime from the key length.
#[derive(Clone)]
pub enum Aes {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl Aes {
    /// Expand a 16, 24 or 32-byte AES key.
    ///
    /// # Errors
    ///
    /// Returns [`SivError::InvalidKeyLength`] for any other length.
    pub fn new(key: &[u8]) -> Result<Self, SivError> {
        let invalid = |_| SivError::InvalidKeyLength(key.len());
        match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            other => Err(SivError::InvalidKeyLength(other)),
        }
    }

    /// AES key size in bits.
    pub fn key_bits(&self) -> usize {
        match self {
            Aes::Aes128(_) => 128,
            Aes::Aes192(_) => 192,
            Aes::Aes256(_) => 256,
        }
    }
}

impl BlockCipher for Aes {
    fn encrypt_block(&self, block: &mut Block) {
        match self {
            Aes::Aes128(c) => BlockCipher::encrypt_block(c, block),
            Aes::Aes192(c) => BlockCipher::encrypt_block(c, block),
            Aes::Aes256(c) => BlockCipher::encrypt_block(c, block),
        }
    }
}

impl std::fmt::Debug for Aes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key schedule.
        write!(f, "Aes{}([REDACTED])", self.key_bits())
    }
}

/// Multiply `block` by x in GF(2^128): shift left one bit and, if the bit
/// shifted out was set, XOR the low byte with `0x87`.
///
/// Branch-free; used for both CMAC subkeys and the S2V accumulator.
pub fn dbl(block: &Block) -> Block {
    let v = u128::from_be_bytes(*block);
    let carry = v >> 127;
    ((v << 1) ^ (carry * DBL_RB)).to_be_bytes()
}

/// XOR `src` into `dst` over the length of the shorter slice.
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    dst.iter_mut().zip(src).for_each(|(d, s)| *d ^= s);
}

/// Pad a partial block with a single `0x80` byte followed by zeros.
///
/// `partial` must be shorter than [`BLOCK_LEN`].
pub fn pad(partial: &[u8]) -> Block {
    debug_assert!(partial.len() < BLOCK_LEN);
    let mut block = [0u8; BLOCK_LEN];
    block[..partial.len()].copy_from_slice(partial);
    block[partial.len()] = 0x80;
    block
}
