//! Edge-case matrix generation.
//!
//! Every combination of key length, all-zero vs random key, plaintext length,
//! all-zero vs random plaintext, associated-data count, and empty vs
//! random-length associated-data elements is encrypted and written out as one
//! record.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siv::TestVector;
use tracing::{debug, info};

use crate::config::{Config, Format};
use crate::format;

/// Dimensions of the generated case matrix.
#[derive(Debug, Clone)]
pub struct Matrix {
    pub key_lengths: Vec<usize>,
    pub plaintext_lengths: Vec<usize>,
    pub ad_counts: Vec<usize>,
    /// Upper bound (inclusive) for random associated-data element lengths.
    pub max_ad_len: usize,
}

impl Default for Matrix {
    fn default() -> Self {
        let mut plaintext_lengths: Vec<usize> = (0..=32).collect();
        plaintext_lengths.extend([41, 58, 67, 127, 128, 129, 500]);
        Self {
            key_lengths: vec![32, 48, 64],
            plaintext_lengths,
            ad_counts: vec![0, 1, 2, 3, 4, 8, 36, 63, 126],
            max_ad_len: 128,
        }
    }
}

impl Matrix {
    /// Number of records [`write_matrix`] produces.
    pub fn case_count(&self) -> usize {
        // Key, plaintext and AD dimensions each pair with a zero/random or
        // empty/random choice.
        self.key_lengths.len() * 2 * self.plaintext_lengths.len() * 2 * self.ad_counts.len() * 2
    }
}

/// Generate every case in `matrix` and write one record per line to `out`.
///
/// Returns the number of records written.
pub fn write_matrix<W, R>(matrix: &Matrix, rng: &mut R, encoding: Format, out: &mut W) -> Result<usize>
where
    W: Write,
    R: Rng,
{
    let mut written = 0usize;
    for &key_len in &matrix.key_lengths {
        for zero_key in [false, true] {
            debug!(key_len, zero_key, "generating key block");
            for &pt_len in &matrix.plaintext_lengths {
                for zero_plaintext in [false, true] {
                    for &ad_count in &matrix.ad_counts {
                        for empty_ad in [false, true] {
                            let key = bytes(rng, key_len, zero_key);
                            let plaintext = bytes(rng, pt_len, zero_plaintext);
                            let associated_data = (0..ad_count)
                                .map(|_| {
                                    if empty_ad {
                                        Vec::new()
                                    } else {
                                        let len = rng.gen_range(1..=matrix.max_ad_len);
                                        bytes(rng, len, false)
                                    }
                                })
                                .collect();

                            let vector = TestVector::generate(&key, plaintext, associated_data)
                                .context("failed to encrypt generated case")?;
                            writeln!(out, "{}", format::encode(&vector, encoding)?)
                                .context("failed to write vector")?;
                            written += 1;
                        }
                    }
                }
            }
        }
    }
    Ok(written)
}

fn bytes<R: Rng>(rng: &mut R, len: usize, zero: bool) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    if !zero {
        rng.fill(buf.as_mut_slice());
    }
    buf
}

/// Generate the default matrix to the configured output.
pub fn run(cfg: &Config) -> Result<()> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out: Box<dyn Write> = match &cfg.output_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {path}"))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let matrix = Matrix::default();
    info!(cases = matrix.case_count(), seeded = cfg.seed.is_some(), "generating vectors");
    let written = write_matrix(&matrix, &mut rng, cfg.format, &mut out)?;
    out.flush().context("failed to flush vector output")?;
    info!(written, "vectors generated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Matrix {
        Matrix {
            key_lengths: vec![32, 64],
            plaintext_lengths: vec![0, 16, 17],
            ad_counts: vec![0, 2],
            max_ad_len: 8,
        }
    }

    fn generate(matrix: &Matrix, seed: u64, encoding: Format) -> Vec<TestVector> {
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let n = write_matrix(matrix, &mut rng, encoding, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let vectors: Vec<TestVector> = text
            .lines()
            .map(|l| format::decode(l, encoding).unwrap())
            .collect();
        assert_eq!(vectors.len(), n);
        vectors
    }

    #[test]
    fn default_matrix_size() {
        let m = Matrix::default();
        assert_eq!(m.plaintext_lengths.len(), 40);
        assert_eq!(m.case_count(), 8640);
    }

    #[test]
    fn writes_every_case_and_each_verifies() {
        let m = small();
        let vectors = generate(&m, 1, Format::Text);
        assert_eq!(vectors.len(), m.case_count());
        for v in &vectors {
            v.check().unwrap();
        }
    }

    #[test]
    fn case_order_follows_matrix() {
        let m = small();
        let vectors = generate(&m, 2, Format::Text);
        let per_key_block = m.plaintext_lengths.len() * 2 * m.ad_counts.len() * 2;

        // Second block of the first key length uses an all-zero key.
        assert!(vectors[..per_key_block].iter().any(|v| v.key().iter().any(|&b| b != 0)));
        assert!(vectors[per_key_block..2 * per_key_block]
            .iter()
            .all(|v| v.key() == vec![0u8; 32]));
        assert!(vectors[2 * per_key_block..].iter().all(|v| v.key().len() == 64));

        // Innermost loop alternates random and empty associated-data elements.
        let (random_ad, empty_ad) = (&vectors[2], &vectors[3]);
        assert_eq!(random_ad.associated_data.len(), 2);
        assert!(random_ad
            .associated_data
            .iter()
            .all(|ad| (1..=m.max_ad_len).contains(&ad.len())));
        assert_eq!(empty_ad.associated_data, vec![Vec::<u8>::new(); 2]);
    }

    #[test]
    fn zero_plaintext_cases_are_zero() {
        let vectors = generate(&small(), 3, Format::Text);
        // pt_len 16, zero plaintext, no AD.
        let v = &vectors[12];
        assert_eq!(v.plaintext, vec![0u8; 16]);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate(&small(), 99, Format::Json);
        let b = generate(&small(), 99, Format::Json);
        assert_eq!(a, b);
        let c = generate(&small(), 100, Format::Json);
        assert_ne!(a, c);
    }
}
