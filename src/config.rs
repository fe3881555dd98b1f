use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://tv12.idlixku.com";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub homepage_timeout: Duration,
    pub page_timeout: Duration,
    pub ajax_timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            homepage_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(15),
            ajax_timeout: Duration::from_secs(10),
        }
    }
}

impl SiteConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').into();
        self
    }

    pub fn ajax_url(&self) -> String {
        format!("{}/wp-admin/admin-ajax.php", self.base_url)
    }

    pub fn item_url(&self, slug: &str) -> String {
        format!("{}/{slug}/", self.base_url)
    }

    pub fn latest_url(&self, page: u16) -> String {
        if page > 1 {
            format!("{}/page/{page}/", self.base_url)
        } else {
            self.base_url.clone()
        }
    }

    /// Host part of the base url, `host:port` when a port is present.
    pub fn host(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let host = url.host_str()?;

        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }
}
