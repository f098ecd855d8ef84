//! Conformance test vectors in the semicolon-delimited line format.
//!
//! ```text
//! hex(ctr_key);hex(mac_key);hex(plaintext);count(AD);hex(AD_1);...;hex(AD_n);hex(ciphertext)
//! ```
//!
//! Hex is lowercase on output and accepted in either case on input. The
//! combined SIV key is `mac_key || ctr_key`.

use std::fmt;
use std::str::FromStr;

use crate::error::VectorError;
use crate::siv::Siv;

const SEPARATOR: char = ';';

/// One recorded encryption case.
#[derive(Clone, PartialEq, Eq)]
pub struct TestVector {
    pub ctr_key: Vec<u8>,
    pub mac_key: Vec<u8>,
    pub plaintext: Vec<u8>,
    pub associated_data: Vec<Vec<u8>>,
    pub ciphertext: Vec<u8>,
}

impl TestVector {
    /// Encrypt `plaintext` under the combined `key` and record the result.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Siv`] if `key` is not 32, 48 or 64 bytes or there
    /// are more than 126 associated-data fields.
    pub fn generate(
        key: &[u8],
        plaintext: Vec<u8>,
        associated_data: Vec<Vec<u8>>,
    ) -> Result<Self, VectorError> {
        let siv = Siv::new(key)?;
        let ciphertext = siv.encrypt(&plaintext, &associated_data)?;
        let (mac_key, ctr_key) = key.split_at(key.len() / 2);
        Ok(Self {
            ctr_key: ctr_key.to_vec(),
            mac_key: mac_key.to_vec(),
            plaintext,
            associated_data,
            ciphertext,
        })
    }

    /// The combined SIV key, `mac_key || ctr_key`.
    pub fn key(&self) -> Vec<u8> {
        [self.mac_key.as_slice(), self.ctr_key.as_slice()].concat()
    }

    /// Re-run the case against this implementation.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CiphertextMismatch`] if encryption disagrees with the record.
    /// - [`VectorError::PlaintextMismatch`] if decryption does not return the plaintext.
    /// - [`VectorError::Siv`] if the keys are invalid, there are too many
    ///   associated-data fields, or authentication fails.
    pub fn check(&self) -> Result<(), VectorError> {
        let siv = Siv::from_split_keys(&self.ctr_key, &self.mac_key)?;
        if siv.encrypt(&self.plaintext, &self.associated_data)? != self.ciphertext {
            return Err(VectorError::CiphertextMismatch);
        }
        if siv.decrypt(&self.ciphertext, &self.associated_data)? != self.plaintext {
            return Err(VectorError::PlaintextMismatch);
        }
        Ok(())
    }

    /// Encode as one line (without a trailing newline).
    pub fn to_line(&self) -> String {
        let mut fields = Vec::with_capacity(5 + self.associated_data.len());
        fields.push(hex::encode(&self.ctr_key));
        fields.push(hex::encode(&self.mac_key));
        fields.push(hex::encode(&self.plaintext));
        fields.push(self.associated_data.len().to_string());
        fields.extend(self.associated_data.iter().map(hex::encode));
        fields.push(hex::encode(&self.ciphertext));
        fields.join(";")
    }

    /// Parse one line. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`VectorError`] describing the first malformed or missing field.
    pub fn parse_line(line: &str) -> Result<Self, VectorError> {
        let mut fields = line.trim().split(SEPARATOR);

        let ctr_key = hex_field(fields.next(), "ctr_key")?;
        let mac_key = hex_field(fields.next(), "mac_key")?;
        let plaintext = hex_field(fields.next(), "plaintext")?;

        let count_field = fields.next().ok_or(VectorError::MissingField("ad_count"))?;
        let count: usize = count_field
            .parse()
            .map_err(|_| VectorError::InvalidCount(count_field.to_string()))?;

        let associated_data = (0..count)
            .map(|_| hex_field(fields.next(), "associated_data"))
            .collect::<Result<Vec<_>, _>>()?;

        let ciphertext = hex_field(fields.next(), "ciphertext")?;

        let trailing = fields.count();
        if trailing > 0 {
            return Err(VectorError::TrailingFields(trailing));
        }

        Ok(Self {
            ctr_key,
            mac_key,
            plaintext,
            associated_data,
            ciphertext,
        })
    }
}

fn hex_field(field: Option<&str>, name: &'static str) -> Result<Vec<u8>, VectorError> {
    let field = field.ok_or(VectorError::MissingField(name))?;
    hex::decode(field).map_err(|source| VectorError::InvalidHex { field: name, source })
}

impl fmt::Display for TestVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl FromStr for TestVector {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl fmt::Debug for TestVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Vectors are public test data, but keep key bytes out of logs anyway.
        f.debug_struct("TestVector")
            .field("key_len", &(self.ctr_key.len() + self.mac_key.len()))
            .field("plaintext_len", &self.plaintext.len())
            .field("ad_count", &self.associated_data.len())
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SivError;

    // RFC 5297 A.1 in line form.
    const A1_LINE: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff;\
                           fffefdfcfbfaf9f8f7f6f5f4f3f2f1f0;\
                           112233445566778899aabbccddee;\
                           1;\
                           101112131415161718191a1b1c1d1e1f2021222324252627;\
                           85632d07c6e8f37f950acd320a2ecc9340c02b9690c4dc04daef7f6afe5c";

    #[test]
    fn parses_and_checks_rfc_vector() {
        let v = TestVector::parse_line(A1_LINE).unwrap();
        assert_eq!(v.associated_data.len(), 1);
        assert_eq!(v.key()[..16], v.mac_key[..]);
        v.check().unwrap();
        assert_eq!(v.to_line(), A1_LINE);
    }

    #[test]
    fn generate_splits_key_halves() {
        let key: Vec<u8> = (0..64u8).collect();
        let v = TestVector::generate(&key, b"pt".to_vec(), vec![vec![], b"ad".to_vec()]).unwrap();
        assert_eq!(v.mac_key, key[..32]);
        assert_eq!(v.ctr_key, key[32..]);
        assert_eq!(v.key(), key);
        assert_eq!(v.ciphertext.len(), 2 + 16);
        v.check().unwrap();
    }

    #[test]
    fn empty_fields_round_trip_through_line() {
        let v = TestVector::generate(&[0u8; 32], vec![], vec![vec![], vec![]]).unwrap();
        let line = v.to_line();
        assert!(line.contains(";;2;;;"));
        let parsed: TestVector = line.parse().unwrap();
        assert_eq!(parsed, v);
    }

    #[test]
    fn zero_ad_line_shape() {
        let v = TestVector::generate(&[0u8; 32], vec![0xab], vec![]).unwrap();
        let line = v.to_string();
        let fields: Vec<&str> = line.split(';').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[2], "ab");
        assert_eq!(fields[3], "0");
    }

    #[test]
    fn accepts_uppercase_hex_and_trailing_newline() {
        let upper = format!("{}\n", A1_LINE.to_uppercase());
        TestVector::parse_line(&upper).unwrap().check().unwrap();
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            TestVector::parse_line("00;00"),
            Err(VectorError::MissingField("plaintext"))
        ));
        assert!(matches!(
            TestVector::parse_line("00;00;00;x;00"),
            Err(VectorError::InvalidCount(_))
        ));
        assert!(matches!(
            TestVector::parse_line("00;00;00;2;00;00"),
            Err(VectorError::MissingField("ciphertext"))
        ));
        assert!(matches!(
            TestVector::parse_line("zz;00;00;0;00"),
            Err(VectorError::InvalidHex { field: "ctr_key", .. })
        ));
        assert!(matches!(
            TestVector::parse_line("00;00;00;0;00;extra"),
            Err(VectorError::TrailingFields(1))
        ));
    }

    #[test]
    fn check_detects_wrong_ciphertext() {
        let mut v = TestVector::parse_line(A1_LINE).unwrap();
        let last = v.ciphertext.len() - 1;
        v.ciphertext[last] ^= 0x01;
        assert!(matches!(v.check(), Err(VectorError::CiphertextMismatch)));
    }

    #[test]
    fn check_reports_bad_keys() {
        let mut v = TestVector::parse_line(A1_LINE).unwrap();
        v.ctr_key.pop();
        assert!(matches!(
            v.check(),
            Err(VectorError::Siv(SivError::SubkeyLengthMismatch { ctr: 15, mac: 16 }))
        ));
    }

    #[test]
    fn debug_omits_key_bytes() {
        let v = TestVector::parse_line(A1_LINE).unwrap();
        let dbg = format!("{v:?}");
        assert!(dbg.contains("key_len: 32"));
        assert!(!dbg.contains("fffefd"));
    }

    #[test]
    fn check_rejects_oversized_associated_data() {
        let mut v = TestVector::parse_line(A1_LINE).unwrap();
        v.associated_data = vec![vec![0u8]; 127];
        assert!(matches!(
            v.check(),
            Err(VectorError::Siv(SivError::TooManyAssociatedData(127)))
        ));
        assert!(matches!(
            TestVector::generate(&[0u8; 32], vec![], vec![vec![]; 127]),
            Err(VectorError::Siv(SivError::TooManyAssociatedData(127)))
        ));
    }
}
