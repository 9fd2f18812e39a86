use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("token is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("decoded token is not valid UTF-8")]
    InvalidUtf8,
    #[error("token is neither base64 nor percent-encoded UTF-8")]
    Undecodable,
}
