use std::sync::OnceLock;

use regex::Regex;

pub fn to_full_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.into()
    }
}

pub fn sanitize_text(text: &str) -> String {
    static SANITIZE_TEXT_REGEXP: OnceLock<regex::Regex> = OnceLock::new();
    let re = SANITIZE_TEXT_REGEXP.get_or_init(|| Regex::new(r#"[\n\t\s]+"#).unwrap());

    re.replace_all(text, " ").into_owned().trim().into()
}
