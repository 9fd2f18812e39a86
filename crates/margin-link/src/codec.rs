use crate::error::LinkError;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use percent_encoding::percent_decode_str;

const CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// `-`/`_` alphabet; what [`encode`] produces.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, CONFIG);

/// `+`/`/` alphabet; accepted so older links keep working.
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, CONFIG);

/// Encodes a document as an unpadded, URL-safe base64 token.
///
/// The UTF-8 bytes of the text are encoded, so multi-byte characters
/// survive the round trip.
pub fn encode(markdown: &str) -> String {
    URL_SAFE.encode(markdown.as_bytes())
}

/// Decodes a token produced by [`encode`].
///
/// Padding is optional, and tokens in the standard `+`/`/` alphabet are
/// accepted too. Fails if the token is not base64 or the bytes are not
/// UTF-8.
pub fn decode(token: &str) -> Result<String, LinkError> {
    let engine = if token.contains(['+', '/']) {
        &STANDARD
    } else {
        &URL_SAFE
    };
    let bytes = engine
        .decode(token)
        .map_err(|e| LinkError::InvalidBase64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| LinkError::InvalidUtf8)
}

/// Decodes a token, falling back to percent-decoding.
///
/// Links created before tokens were base64 carried the document
/// percent-encoded; those still load through the fallback.
pub fn decode_lenient(token: &str) -> Result<String, LinkError> {
    decode(token).or_else(|_| {
        percent_decode_str(token)
            .decode_utf8()
            .map(|text| text.into_owned())
            .map_err(|_| LinkError::Undecodable)
    })
}
