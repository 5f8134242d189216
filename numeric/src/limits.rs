use serde::{Deserialize, Serialize};

/// Tunable safety limits of the numeric layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    /// `a ** b` is computed exactly only while `bit_length(a) * b` stays within this many bits.
    pub pow_bits: u64,
}

impl Limits {
    pub const DEFAULT_POW_BITS: u64 = 32 * 1024 * 1024;

    /// Reads limits from JSON, taking defaults for absent fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            pow_bits: Self::DEFAULT_POW_BITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json() {
        assert_eq!(Limits::from_json("{}").unwrap(), Limits::default());
        assert_eq!(Limits::from_json(r#"{"powBits": 64}"#).unwrap().pow_bits, 64);
        assert!(Limits::from_json(r#"{"powBits": -1}"#).is_err());
        assert_eq!(
            serde_json::to_string(&Limits::default()).unwrap(),
            r#"{"powBits":33554432}"#
        );
    }
}
