use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::DecodeError;

/// Decode standard (padded) base64. Line breaks (`\r`, `\n`) are skipped so
/// output wrapped by `base64` at 76 columns still decodes; any other byte
/// outside the alphabet is an error.
///
/// An empty string means the value was not supplied and decodes to an empty
/// buffer. Whether that is acceptable is up to the caller's policy.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    if encoded.contains(['\r', '\n']) {
        let unwrapped: String = encoded
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();
        return Ok(STANDARD.decode(unwrapped)?);
    }

    Ok(STANDARD.decode(encoded)?)
}
