//! `opaqueid` resolves opaque "public" resource identifiers to private
//! identity tuples (system, resource type, local identifier) and back, for
//! systems that must publish stable IDs without exposing internal ones.
//!
//! Several identifier generations coexist in live traffic and are routed by
//! an ordered, first-match-wins [`Dispatcher`]:
//!
//! - Patient ICNs (ten digits, `V`, six digits by default) pass through
//!   untouched in both directions.
//! - `I3-` tokens: Blowfish-encrypted, 7-bit packed, base-62 encoded.
//! - `I2-` tokens: AES-encrypted, UTF-8, base-32 encoded with `0` padding.
//! - Legacy UUIDs are forwarded to an external registry implementing
//!   [`IdentityService`].
//!
//! Encoding is deliberately *not* strong encryption: the key salt and IVs
//! are fixed constants so that the same identity always produces the same
//! token. Anyone holding the encoding password can reverse tokens, so
//! protecting the password is the caller's responsibility.
//!
//! # Usage
//!
//! ## Resolving and registering through the dispatch chain
//!
//! ```
//! use opaqueid::{
//!     Codebook, Dispatcher, Format, IdentityService, Mapping, ResourceIdentity, TokenEncoder,
//!     DEFAULT_ICN_PATTERN, V2_PREFIX, V3_PREFIX,
//! };
//!
//! let codebook = Codebook::new([
//!     Mapping::new("WHATEVER", "W"),
//!     Mapping::new("ANYTHING", "A"),
//! ]).unwrap();
//! let ids = Dispatcher::new(vec![
//!     Format::patient_icn(DEFAULT_ICN_PATTERN).unwrap(),
//!     Format::encoded_token(V3_PREFIX, TokenEncoder::v3("magic-ids", codebook.clone()).unwrap()),
//!     Format::encoded_token(V2_PREFIX, TokenEncoder::v2("magic-ids", codebook).unwrap()),
//! ]);
//!
//! // Patient ICNs are never transformed; the public ID is the ICN itself.
//! let registered = ids
//!     .register(&[ResourceIdentity::new("MVI", "PATIENT", "1011537977V693883")])
//!     .unwrap();
//! assert_eq!(registered[0].public_id, "1011537977V693883");
//!
//! // Everything else becomes an encrypted token that resolves back to the
//! // same tuple.
//! let identity = ResourceIdentity::new("WHATEVER", "ANYTHING", "ABC:123");
//! let registered = ids.register(std::slice::from_ref(&identity)).unwrap();
//! assert!(registered[0].public_id.starts_with(V3_PREFIX));
//! assert_eq!(ids.lookup(&registered[0].public_id).unwrap(), vec![identity]);
//! ```
//!
//! ## Low-level encoding
//!
//! [`TokenEncoder`] encodes single identities without prefix handling or
//! dispatch.
//!
//! ```
//! use opaqueid::{Codebook, Mapping, ResourceIdentity, TokenEncoder};
//!
//! let codebook = Codebook::new([
//!     Mapping::new("WHATEVER", "W"),
//!     Mapping::new("ANYTHING", "A"),
//! ]).unwrap();
//! let encoder = TokenEncoder::v2("magic-ids", codebook).unwrap();
//! let identity = ResourceIdentity::new("WHATEVER", "ANYTHING", "ABC:123");
//! let token = encoder.encode(&identity).unwrap();
//! assert_eq!(token, "YB5TMQSQD7VLO3DMYWR7WJGBTY000000");
//! assert_eq!(encoder.decode(&token).unwrap(), identity);
//! ```

mod api;
mod cipher;
mod codebook;
mod config;
mod delimited;
mod dispatch;
mod encoder;
mod error;
mod format;
mod packing;
mod urlsafe;

pub use api::{IdentityService, Registration, ResourceIdentity};
pub use cipher::Mechanism;
pub use codebook::{Codebook, Mapping};
pub use config::{ConfigError, EncoderConfig};
pub use dispatch::Dispatcher;
pub use encoder::{TextEncoding, TokenEncoder};
pub use error::Error;
pub use format::{Format, DEFAULT_ICN_PATTERN, V2_PREFIX, V3_PREFIX};
pub use urlsafe::UrlSafeEncoding;
