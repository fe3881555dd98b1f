//! Candidate passwords for the player envelope.
//!
//! A [`KeyRing`] is built once per session: the static baseline plus any
//! nonce published on the landing page. Discovered nonces go to the front
//! so they are tried first.

use std::sync::OnceLock;

use log::{debug, info, warn};
use regex::Regex;

use crate::{config::SiteConfig, utils};

const STATIC_KEYS: &[&str] = &["459283", "idlix", "id123", "root", "dooplay"];
const TRAILING_KEYS: &[&str] = &["Dooplay", "admin"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRing {
    keys: Vec<String>,
}

impl KeyRing {
    pub fn new(baseline: Vec<String>) -> Self {
        let mut keys: Vec<String> = Vec::with_capacity(baseline.len());
        for key in baseline {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        Self { keys }
    }

    /// Baseline followed by `tokens`, each token moved to the front in turn.
    pub fn with_tokens<I>(baseline: Vec<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut keyring = Self::new(baseline);
        for token in tokens {
            keyring.insert_front(token);
        }
        keyring
    }

    /// Fetches the landing page and adds any nonce found there.
    ///
    /// Never fails: on network errors the baseline is returned as is.
    pub async fn discover(config: &SiteConfig) -> Self {
        let keys = baseline(config);

        info!("[idlix] updating dynamic keys");

        let request = utils::create_client()
            .get(&config.base_url)
            .timeout(config.homepage_timeout);

        match utils::load_text(request).await {
            Ok(html) => {
                let tokens = homepage_tokens(&html);
                if tokens.is_empty() {
                    info!("[idlix] no nonce found in homepage");
                }
                Self::with_tokens(keys, tokens)
            }
            Err(err) => {
                warn!("[idlix] failed to update keys: {err}");
                Self::new(keys)
            }
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn insert_front(&mut self, token: String) {
        if !self.keys.contains(&token) {
            self.keys.insert(0, token);
        }
    }
}

/// Known passwords in priority order; the site entries follow `config`.
pub fn baseline(config: &SiteConfig) -> Vec<String> {
    let mut keys: Vec<String> = STATIC_KEYS.iter().map(|&s| s.to_owned()).collect();

    if let Some(host) = config.host() {
        keys.push(host);
    }
    keys.push(format!("{}/", config.base_url));
    keys.extend(TRAILING_KEYS.iter().map(|&s| s.to_owned()));

    keys
}

/// Session nonces published in the landing page markup, in pattern order.
pub fn homepage_tokens(html: &str) -> Vec<String> {
    static NONCE_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = NONCE_PATTERNS.get_or_init(|| {
        [
            r#""nonce":"(\w+)""#,
            r#"dt_nonce\s*=\s*"(\w+)""#,
            r#"name="nonce"\s+value="(\w+)""#,
            r#"id="result_nonce"\s+value="(\w+)""#,
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    });

    patterns
        .iter()
        .filter_map(|re| {
            let nonce = re.captures(html)?.get(1)?.as_str();
            debug!("[idlix] found nonce with pattern '{}': {nonce}", re.as_str());
            Some(nonce.to_owned())
        })
        .collect()
}
