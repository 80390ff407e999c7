use aes::Aes128;
use blowfish::Blowfish;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyInit};
use once_cell::sync::OnceCell;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::config::ConfigError;

/// Fixed initialization material for the key salt and the IVs. Tokens must
/// be a pure deterministic function of (password, identity) so the same
/// identity always encodes to the same public ID; a randomized salt or IV
/// would break that, and changing these bytes would invalidate every
/// identifier issued so far.
const INIT_MATERIAL: &[u8; 19] = b"EncryptingIdEncoder";

const PBKDF2_ROUNDS: u32 = 10_000;

/// Supported block ciphers. Both run in CBC mode with PKCS#7 padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// AES-128 with a PBKDF2-HMAC-SHA256 derived key. The original token
    /// generation.
    Aes,
    /// Blowfish keyed directly with the password bytes. Its 8-byte blocks
    /// waste less length on padding, which matters for short tokens.
    Blowfish,
}

impl Mechanism {
    fn block_size(&self) -> usize {
        match self {
            Mechanism::Aes => 16,
            Mechanism::Blowfish => 8,
        }
    }

    fn iv(&self) -> &'static [u8] {
        &INIT_MATERIAL[..self.block_size()]
    }
}

enum Schedule {
    Aes(Aes128),
    Blowfish(Blowfish),
}

/// Raised on any block-size or padding failure. The encoder decides what it
/// means: a corrupted token on decode, a misconfiguration on encode.
#[derive(Debug)]
pub(crate) struct CipherFailure;

/// Deterministic symmetric encryption keyed by a password.
///
/// Key derivation and cipher key-schedule setup are the expensive part, so
/// they run once behind a sync guard; each call then clones the scheduled
/// cipher, which is cheap, instead of pooling per-thread instances.
pub(crate) struct Crypter {
    mechanism: Mechanism,
    password: String,
    schedule: OnceCell<Schedule>,
}

impl Crypter {
    pub(crate) fn new(mechanism: Mechanism, password: &str) -> Result<Self, ConfigError> {
        if password.trim().is_empty() {
            return Err(ConfigError::InvalidKey(
                "password must not be blank".to_string(),
            ));
        }
        if mechanism == Mechanism::Blowfish && !(4..=56).contains(&password.len()) {
            return Err(ConfigError::InvalidKey(format!(
                "blowfish password must be 4 to 56 bytes, got {}",
                password.len()
            )));
        }
        Ok(Crypter {
            mechanism,
            password: password.to_string(),
            schedule: OnceCell::new(),
        })
    }

    fn schedule(&self) -> &Schedule {
        self.schedule.get_or_init(|| {
            tracing::debug!(mechanism = ?self.mechanism, "deriving cipher key schedule");
            match self.mechanism {
                Mechanism::Aes => {
                    let mut key = [0u8; 16];
                    pbkdf2_hmac::<Sha256>(
                        self.password.as_bytes(),
                        &INIT_MATERIAL[..8],
                        PBKDF2_ROUNDS,
                        &mut key,
                    );
                    Schedule::Aes(
                        Aes128::new_from_slice(&key).expect("derived key is 16 bytes"),
                    )
                }
                Mechanism::Blowfish => Schedule::Blowfish(
                    Blowfish::new_from_slice(self.password.as_bytes())
                        .expect("key length is validated at construction"),
                ),
            }
        })
    }

    pub(crate) fn encrypt(&self, plain: &[u8]) -> Result<Vec<u8>, CipherFailure> {
        Ok(match self.schedule() {
            Schedule::Aes(cipher) => {
                cbc::Encryptor::<Aes128>::inner_iv_slice_init(cipher.clone(), self.mechanism.iv())
                    .map_err(|_| CipherFailure)?
                    .encrypt_padded_vec_mut::<Pkcs7>(plain)
            }
            Schedule::Blowfish(cipher) => {
                cbc::Encryptor::<Blowfish>::inner_iv_slice_init(cipher.clone(), self.mechanism.iv())
                    .map_err(|_| CipherFailure)?
                    .encrypt_padded_vec_mut::<Pkcs7>(plain)
            }
        })
    }

    pub(crate) fn decrypt(&self, encrypted: &[u8]) -> Result<Vec<u8>, CipherFailure> {
        if encrypted.is_empty() || encrypted.len() % self.mechanism.block_size() != 0 {
            return Err(CipherFailure);
        }
        match self.schedule() {
            Schedule::Aes(cipher) => {
                cbc::Decryptor::<Aes128>::inner_iv_slice_init(cipher.clone(), self.mechanism.iv())
                    .map_err(|_| CipherFailure)?
                    .decrypt_padded_vec_mut::<Pkcs7>(encrypted)
                    .map_err(|_| CipherFailure)
            }
            Schedule::Blowfish(cipher) => {
                cbc::Decryptor::<Blowfish>::inner_iv_slice_init(cipher.clone(), self.mechanism.iv())
                    .map_err(|_| CipherFailure)?
                    .decrypt_padded_vec_mut::<Pkcs7>(encrypted)
                    .map_err(|_| CipherFailure)
            }
        }
    }
}
