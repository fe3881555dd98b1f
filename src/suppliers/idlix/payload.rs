//! Media url extraction from a player response or a decrypted envelope.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::envelope::CIPHERTEXT_MARKER;
use crate::error::ResolveError;

/// Undoes the JSON string escaping left on a decrypted payload.
pub fn clean_decrypted(text: &str) -> String {
    text.replace(r#"\""#, "\"")
        .replace(r"\/", "/")
        .trim_matches('"')
        .to_owned()
}

/// Resolves the final url: `embed_url`, then `content` re-read once, then the
/// first iframe `src`, then the text itself.
pub fn extract_media_url(text: &str) -> Result<String, ResolveError> {
    let text = text.trim();

    let candidate = match json_rule(text) {
        JsonRule::Url(url) => url,
        JsonRule::Content(content) => html_rule(content.trim()),
        JsonRule::FallThrough => html_rule(text),
    };

    if candidate.is_empty() {
        return Err(ResolveError::ExtractionFailure("empty response".into()));
    }

    if looks_encrypted(&candidate) {
        return Err(ResolveError::ExtractionFailure(
            "url still looks encrypted".into(),
        ));
    }

    Ok(candidate)
}

fn looks_encrypted(candidate: &str) -> bool {
    candidate.contains(&format!("{{{CIPHERTEXT_MARKER}"))
}

enum JsonRule {
    Url(String),
    Content(String),
    FallThrough,
}

fn json_rule(text: &str) -> JsonRule {
    if !text.starts_with('{') {
        return JsonRule::FallThrough;
    }

    let object = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => object,
        _ => return JsonRule::FallThrough,
    };

    if let Some(url) = object
        .get("embed_url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return JsonRule::Url(url.to_owned());
    }

    match object.get("content").and_then(Value::as_str) {
        Some(content) => JsonRule::Content(content.to_owned()),
        None => JsonRule::FallThrough,
    }
}

fn html_rule(text: &str) -> String {
    if text.contains("<iframe") {
        if let Some(src) = iframe_src(text) {
            return src;
        }
    }

    text.to_owned()
}

fn iframe_src(html: &str) -> Option<String> {
    static IFRAME_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = IFRAME_SELECTOR.get_or_init(|| Selector::parse("iframe").unwrap());

    let fragment = Html::parse_fragment(html);
    let src = fragment
        .select(selector)
        .next()?
        .attr("src")?
        .trim()
        .to_owned();

    (!src.is_empty()).then_some(src)
}
