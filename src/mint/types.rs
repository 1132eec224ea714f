//! Mint wire types.

use serde::{Deserialize, Serialize};

use crate::http::envelope::Outcome;

/// Inbound mint request.
///
/// All fields default when absent so validation, not decoding, reports
/// missing values with their own wire codes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MintRequest {
    /// Hex-encoded private key used to sign the transaction.
    pub pkey: String,
    /// Hex-encoded destination address for the minted tokens.
    pub address: String,
    /// Data to put in the blob, base64 on the wire. Can be empty.
    #[serde(with = "base64_bytes")]
    pub blob: Vec<u8>,
}

/// Outbound mint response. `code == 1` signals success.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MintResponse {
    pub code: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub txid: String,
}

impl MintResponse {
    pub fn failure(code: i32) -> Self {
        Self {
            code,
            txid: String::new(),
        }
    }
}

impl Outcome for MintResponse {
    fn code(&self) -> i32 {
        self.code
    }
}

/// Base64 (de)serialization for binary wire fields, matching the JSON
/// convention for byte arrays the deployed clients already speak.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_decodes_base64_blob() {
        let req: MintRequest =
            serde_json::from_str(r#"{"pkey":"ab","address":"0x1","blob":"aGVsbG8="}"#).unwrap();
        assert_eq!(req.blob, b"hello");
    }

    #[test]
    fn test_missing_fields_default() {
        let req: MintRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pkey.is_empty());
        assert!(req.address.is_empty());
        assert!(req.blob.is_empty());
    }

    #[test]
    fn test_bad_base64_is_a_decode_error() {
        let result = serde_json::from_str::<MintRequest>(r#"{"blob":"!!!"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_omits_empty_txid() {
        let body = serde_json::to_string(&MintResponse::failure(6)).unwrap();
        assert_eq!(body, r#"{"code":6}"#);

        let body = serde_json::to_string(&MintResponse {
            code: 1,
            txid: "0xabc".into(),
        })
        .unwrap();
        assert_eq!(body, r#"{"code":1,"txid":"0xabc"}"#);
    }
}
