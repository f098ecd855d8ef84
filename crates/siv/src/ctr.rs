//! CTR mode keystream over a [`BlockCipher`], 128-bit big-endian counter.

use zeroize::Zeroize;

use crate::block::{xor_in_place, Block, BlockCipher, BLOCK_LEN};

/// XOR the CTR keystream starting at `counter` into `buf`.
///
/// The counter is incremented as one 128-bit big-endian integer, wrapping
/// modulo 2^128. Encryption and decryption are the same operation.
pub fn apply_keystream<C: BlockCipher>(cipher: &C, counter: &Block, buf: &mut [u8]) {
    let mut ctr = u128::from_be_bytes(*counter);
    let mut keystream = [0u8; BLOCK_LEN];
    for chunk in buf.chunks_mut(BLOCK_LEN) {
        keystream = ctr.to_be_bytes();
        cipher.encrypt_block(&mut keystream);
        xor_in_place(chunk, &keystream);
        ctr = ctr.wrapping_add(1);
    }
    keystream.zeroize();
}
