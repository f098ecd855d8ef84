//! S2V (String-to-Vector, RFC 5297 §2.4): folds the associated-data fields and
//! the plaintext into one 16-byte synthetic IV.

use zeroize::Zeroize;

use crate::block::{dbl, pad, xor_in_place, Block, BlockCipher, BLOCK_LEN};
use crate::cmac::Cmac;
use crate::error::SivError;

/// Largest number of associated-data fields S2V accepts (RFC 5297 §7).
pub const MAX_ASSOCIATED_DATA: usize = 126;

const ZERO: Block = [0u8; BLOCK_LEN];

const ONE: Block = {
    let mut one = [0u8; BLOCK_LEN];
    one[BLOCK_LEN - 1] = 0x01;
    one
};

/// Compute `S2V(mac, associated_data..., plaintext)`.
///
/// The fields are folded in iteration order, so reordering associated data
/// changes the result. With no associated data and an empty plaintext the
/// result is `CMAC(<one>)`.
///
/// # Errors
///
/// Returns [`SivError::TooManyAssociatedData`] if more than
/// [`MAX_ASSOCIATED_DATA`] fields are given. No CMAC is computed in that case.
pub fn s2v<C, I, T>(mac: &Cmac<C>, associated_data: I, plaintext: &[u8]) -> Result<Block, SivError>
where
    C: BlockCipher,
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let fields = collect_associated_data(associated_data)?;
    if fields.is_empty() && plaintext.is_empty() {
        return Ok(mac.compute(&ONE));
    }

    let mut d = mac.compute(&ZERO);
    for field in &fields {
        d = dbl(&d);
        xor_in_place(&mut d, &mac.compute(field.as_ref()));
    }
    Ok(finish(mac, &mut d, plaintext))
}

/// Gather the associated-data fields, rejecting more than [`MAX_ASSOCIATED_DATA`].
pub(crate) fn collect_associated_data<I, T>(associated_data: I) -> Result<Vec<T>, SivError>
where
    I: IntoIterator<Item = T>,
{
    let fields: Vec<T> = associated_data.into_iter().collect();
    if fields.len() > MAX_ASSOCIATED_DATA {
        return Err(SivError::TooManyAssociatedData(fields.len()));
    }
    Ok(fields)
}

/// Absorb the plaintext into the accumulator `d` and return the final CMAC.
/// `d` and every intermediate block are wiped before returning.
fn finish<C: BlockCipher>(mac: &Cmac<C>, d: &mut Block, plaintext: &[u8]) -> Block {
    let v = if plaintext.len() >= BLOCK_LEN {
        // xorend: XOR D into the final 16 bytes.
        let mut t = plaintext.to_vec();
        let tail = t.len() - BLOCK_LEN;
        xor_in_place(&mut t[tail..], d);
        let v = mac.compute(&t);
        t.zeroize();
        v
    } else {
        let mut t = dbl(d);
        xor_in_place(&mut t, &pad(plaintext));
        let v = mac.compute(&t);
        t.zeroize();
        v
    };
    d.zeroize();
    v
}
