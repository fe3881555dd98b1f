//! Player envelope decryption.
//!
//! The envelope is the CryptoJS AES JSON format: `{"ct": base64, "iv": hex, "s": hex}`.
//! The key is derived from a candidate password and the salt; the IV is taken
//! from the envelope.

use anyhow::anyhow;
use base64::{Engine, prelude::BASE64_STANDARD};
use log::debug;
use serde::Deserialize;

use crate::utils::crypto_js;

/// Marker of a serialized envelope in a response body.
pub const CIPHERTEXT_MARKER: &str = r#""ct":"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
    pub salt: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeJson {
    ct: String,
    iv: String,
    s: String,
}

impl Envelope {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let json: EnvelopeJson = serde_json::from_str(text)?;

        Ok(Self {
            ciphertext: BASE64_STANDARD
                .decode(json.ct.as_bytes())
                .map_err(|e| anyhow!("invalid ct: {e}"))?,
            iv: hex::decode(&json.iv).map_err(|e| anyhow!("invalid iv: {e}"))?,
            salt: hex::decode(&json.s).map_err(|e| anyhow!("invalid salt: {e}"))?,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({
            "ct": BASE64_STANDARD.encode(&self.ciphertext),
            "iv": hex::encode(&self.iv),
            "s": hex::encode(&self.salt),
        })
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted<'a> {
    pub key: &'a str,
    pub plaintext: String,
}

pub fn is_encrypted(text: &str) -> bool {
    text.contains(CIPHERTEXT_MARKER)
}

/// Plaintext for one candidate password, `None` when it does not fit.
///
/// An empty plaintext counts as a miss.
pub fn decrypt_with_password(envelope: &Envelope, password: &str) -> Option<String> {
    match crypto_js::decrypt_aes_with_iv(
        password.as_bytes(),
        &envelope.salt,
        &envelope.iv,
        &envelope.ciphertext,
    ) {
        Ok(pt) if !pt.is_empty() => Some(pt),
        Ok(_) => None,
        Err(err) => {
            debug!("[idlix] key '{password}' rejected: {err}");
            None
        }
    }
}

/// Same as [`decrypt_with_password`] for a serialized envelope.
pub fn decrypt_text(text: &str, password: &str) -> Option<String> {
    match Envelope::parse(text) {
        Ok(envelope) => decrypt_with_password(&envelope, password),
        Err(err) => {
            debug!("[idlix] malformed envelope: {err}");
            None
        }
    }
}

/// Tries `keys` in order and stops at the first one that decrypts.
pub fn decrypt_with_keys<'a, I>(envelope: &Envelope, keys: I) -> Option<Decrypted<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter().find_map(|key| {
        decrypt_with_password(envelope, key).map(|plaintext| Decrypted { key, plaintext })
    })
}

pub fn encrypt_with_password(
    plaintext: &str,
    password: &str,
    salt: &[u8],
    iv: &[u8],
) -> anyhow::Result<Envelope> {
    let ciphertext =
        crypto_js::encrypt_aes_with_iv(password.as_bytes(), salt, iv, plaintext.as_bytes())?;

    Ok(Envelope {
        ciphertext,
        iv: iv.to_vec(),
        salt: salt.to_vec(),
    })
}
