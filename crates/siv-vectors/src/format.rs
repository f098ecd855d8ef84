//! Record encodings for vector files: the semicolon line format and JSON lines.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use siv::TestVector;

use crate::config::Format;

/// JSON-lines form of a [`TestVector`]; every byte field is lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonVector {
    pub ctr_key: String,
    pub mac_key: String,
    pub plaintext: String,
    pub associated_data: Vec<String>,
    pub ciphertext: String,
}

impl From<&TestVector> for JsonVector {
    fn from(v: &TestVector) -> Self {
        Self {
            ctr_key: hex::encode(&v.ctr_key),
            mac_key: hex::encode(&v.mac_key),
            plaintext: hex::encode(&v.plaintext),
            associated_data: v.associated_data.iter().map(hex::encode).collect(),
            ciphertext: hex::encode(&v.ciphertext),
        }
    }
}

impl TryFrom<JsonVector> for TestVector {
    type Error = anyhow::Error;

    fn try_from(j: JsonVector) -> Result<Self> {
        Ok(Self {
            ctr_key: hex::decode(&j.ctr_key).context("invalid hex in ctr_key")?,
            mac_key: hex::decode(&j.mac_key).context("invalid hex in mac_key")?,
            plaintext: hex::decode(&j.plaintext).context("invalid hex in plaintext")?,
            associated_data: j
                .associated_data
                .iter()
                .map(hex::decode)
                .collect::<Result<_, _>>()
                .context("invalid hex in associated_data")?,
            ciphertext: hex::decode(&j.ciphertext).context("invalid hex in ciphertext")?,
        })
    }
}

/// Encode one vector as a single line (no trailing newline).
pub fn encode(vector: &TestVector, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(vector.to_line()),
        Format::Json => serde_json::to_string(&JsonVector::from(vector))
            .context("failed to serialise vector as JSON"),
    }
}

/// Decode one line in the given format.
pub fn decode(line: &str, format: Format) -> Result<TestVector> {
    match format {
        Format::Text => TestVector::parse_line(line).context("malformed vector line"),
        Format::Json => {
            let j: JsonVector =
                serde_json::from_str(line.trim()).context("malformed JSON vector")?;
            TestVector::try_from(j)
        }
    }
}
