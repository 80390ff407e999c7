use thiserror::Error;

use crate::cipher::Mechanism;
use crate::codebook::Codebook;
use crate::encoder::TextEncoding;
use crate::urlsafe::UrlSafeEncoding;

/// Configuration for a [`TokenEncoder`](crate::TokenEncoder).
///
/// The defaults match the earliest deployed token generation: AES encryption,
/// plain UTF-8 text bytes, and base-32 output. Outstanding identifiers were
/// issued under those settings, so the defaults must never change.
#[derive(Clone)]
pub struct EncoderConfig {
    pub(crate) password: String,
    pub(crate) codebook: Codebook,
    pub(crate) mechanism: Mechanism,
    pub(crate) encoding: UrlSafeEncoding,
    pub(crate) text: TextEncoding,
}

impl EncoderConfig {
    /// Create a configuration with the given encoding password and codebook,
    /// and all other settings at their defaults.
    pub fn new(password: impl Into<String>, codebook: Codebook) -> Self {
        EncoderConfig {
            password: password.into(),
            codebook,
            mechanism: Mechanism::Aes,
            encoding: UrlSafeEncoding::Base32,
            text: TextEncoding::Utf8,
        }
    }

    /// Sets the encryption mechanism.
    pub fn mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanism = mechanism;
        self
    }

    /// Sets the URL-safe output encoding.
    pub fn encoding(mut self, encoding: UrlSafeEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets how delimited text is converted to cipher input bytes.
    pub fn text(mut self, text: TextEncoding) -> Self {
        self.text = text;
        self
    }
}

/// Construction-time failures. All configuration is validated eagerly so a
/// bad setup fails at startup, never in the middle of traffic.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate long value in codebook: {0}")]
    DuplicateLongValue(String),

    #[error("duplicate shortened value in codebook: {0}")]
    DuplicateShortValue(String),

    #[error("invalid id pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid encoding key: {0}")]
    InvalidKey(String),
}
