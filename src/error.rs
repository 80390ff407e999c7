use thiserror::Error;

/// Runtime failures raised while resolving or registering identifiers.
///
/// All of these are recoverable, caller-facing errors. None of them corrupt
/// shared state: the codebook and the configured format chain are never
/// mutated after construction.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was blank before encoding. Caller error.
    #[error("resource identity is incomplete: {0}")]
    IncompleteResourceIdentity(String),

    /// The payload decrypted without a cipher error but does not parse into
    /// three non-blank delimited parts. The expected signature of tampered
    /// ciphertext or a wrong encoding key.
    #[error("decrypted value is not a recognizable identity: {0:?}")]
    UnknownRepresentation(String),

    /// A malformed, foreign, or corrupted public identifier. Happens fairly
    /// easily since IDs are provided by callers.
    #[error("do not understand id: {0}")]
    BadId(String),

    /// Cipher failure while encoding a well-formed identity. The plaintext
    /// is always valid at that point, so this indicates a misconfigured
    /// encoder rather than bad input.
    #[error("unable to encode identity: {0}")]
    EncodingFailed(String),

    /// No configured format accepted the identity for registration. Only
    /// possible when the format chain lacks a catch-all encoded-token format.
    #[error("no format accepts identity for registration: {0}")]
    RegistrationFailed(String),

    /// A failure raised by the external registry delegate, passed through
    /// unmodified.
    #[error(transparent)]
    Delegate(#[from] Box<dyn std::error::Error + Send + Sync>),
}
