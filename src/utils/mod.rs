pub mod crypto;
pub mod crypto_js;
pub mod html;
pub mod text;

use std::{sync::OnceLock, time::Duration};

use reqwest::{
    ClientBuilder,
    header::{self, HeaderMap},
};

pub fn get_user_agent<'a>() -> &'a str {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
}

pub fn create_client() -> &'static reqwest::Client {
    static LAZZY_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    LAZZY_CLIENT.get_or_init(|| {
        let builder = create_client_builder();

        let mut headers = get_default_headers();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        builder
            .default_headers(headers)
            .build()
            .unwrap_or_else(|err| {
                log::warn!("fail to build http client: {err}, fallback to defaults");
                reqwest::Client::new()
            })
    })
}

pub fn create_client_builder() -> reqwest::ClientBuilder {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .read_timeout(Duration::from_secs(30))
        .user_agent(get_user_agent())
        .danger_accept_invalid_certs(true)
        .cookie_store(true)
}

pub fn get_default_headers() -> HeaderMap {
    let mut headers = HeaderMap::default();

    headers.insert(
        header::ACCEPT_ENCODING,
        header::HeaderValue::from_static("gzip, deflate, br"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache"),
    );
    headers.insert(header::PRAGMA, header::HeaderValue::from_static("no-cache"));
    headers.insert(header::DNT, header::HeaderValue::from_static("1"));
    headers
}

/// Sends the request and returns the body, treating non-2xx statuses as errors.
pub async fn load_text(request_builder: reqwest::RequestBuilder) -> Result<String, reqwest::Error> {
    request_builder
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

pub async fn scrap_page<T, P>(
    request_builder: reqwest::RequestBuilder,
    processor: &P,
) -> Result<T, anyhow::Error>
where
    P: html::DOMProcessor<T> + ?Sized,
{
    let html = load_text(request_builder).await?;

    Ok(scrap_html(&html, processor))
}

pub fn scrap_html<T, P>(html: &str, processor: &P) -> T
where
    P: html::DOMProcessor<T> + ?Sized,
{
    let document = scraper::Html::parse_document(html);
    let root = document.root_element();

    processor.process(&root)
}
