//! CMAC / OMAC1 (NIST SP 800-38B, RFC 4493) over any [`BlockCipher`].

use zeroize::Zeroize;

use crate::block::{dbl, pad, xor_in_place, Block, BlockCipher, BLOCK_LEN};

/// A keyed CMAC instance.
///
/// Subkeys K1 and K2 are derived once at construction and reused for every
/// [`Cmac::compute`] call. They are wiped when the instance is dropped.
#[derive(Clone)]
pub struct Cmac<C> {
    cipher: C,
    k1: Block,
    k2: Block,
}

impl<C: BlockCipher> Cmac<C> {
    /// Derive the subkeys for `cipher`: `L = E(0^128)`, `K1 = dbl(L)`, `K2 = dbl(K1)`.
    pub fn new(cipher: C) -> Self {
        let mut l = [0u8; BLOCK_LEN];
        cipher.encrypt_block(&mut l);
        let k1 = dbl(&l);
        let k2 = dbl(&k1);
        l.zeroize();
        Self { cipher, k1, k2 }
    }

    /// The underlying block cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Compute the 16-byte tag over `message`.
    ///
    /// An empty message is processed as one padded block.
    pub fn compute(&self, message: &[u8]) -> Block {
        let complete_last = !message.is_empty() && message.len() % BLOCK_LEN == 0;
        let last_start = if message.is_empty() {
            0
        } else {
            (message.len() - 1) / BLOCK_LEN * BLOCK_LEN
        };
        let (head, last) = message.split_at(last_start);

        let mut x = [0u8; BLOCK_LEN];
        for chunk in head.chunks_exact(BLOCK_LEN) {
            xor_in_place(&mut x, chunk);
            self.cipher.encrypt_block(&mut x);
        }

        if complete_last {
            xor_in_place(&mut x, last);
            xor_in_place(&mut x, &self.k1);
        } else {
            xor_in_place(&mut x, &pad(last));
            xor_in_place(&mut x, &self.k2);
        }
        self.cipher.encrypt_block(&mut x);
        x
    }
}

impl<C> Drop for Cmac<C> {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
    }
}

impl<C> std::fmt::Debug for Cmac<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Cmac([REDACTED])")
    }
}

/// One-shot CMAC of `message` under `cipher`.
pub fn cmac<C: BlockCipher>(cipher: C, message: &[u8]) -> Block {
    Cmac::new(cipher).compute(message)
}
