//! Dooplay based movie site (idlix).
//!
//! Listing pages are plain markup. The stream location is behind the
//! `doo_player_ajax` handshake and, most of the time, an encrypted envelope.

pub mod envelope;
pub mod keyring;
pub mod payload;


use std::sync::OnceLock;

use log::{error, info, warn};

use crate::{
    config::SiteConfig,
    error::ResolveError,
    models::{ContentDetails, ContentDetailsPage, ContentInfo, ContentMediaItem, StreamResult},
    utils::{
        self,
        html::{self, DOMProcessor},
    },
};
use envelope::Envelope;
use keyring::KeyRing;

pub const ID_PREFIX: &str = "movie:";
const AJAX_ACTION: &str = "doo_player_ajax";
const PLAYER_OPTION_SELECTOR: &str = "#playeroptionsul li";
const GENRE: &str = "Movie";

/// Identifiers of one player option, as sent to the ajax endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOption {
    pub post: String,
    pub nume: String,
    pub kind: String,
}

impl PlayerOption {
    /// First player option of a detail page. `data-post` is mandatory.
    pub fn from_html(html: &str) -> Option<Self> {
        static PLAYER_OPTION_PROCESSOR: OnceLock<PlayerOptionProcessor> = OnceLock::new();
        let processor = PLAYER_OPTION_PROCESSOR.get_or_init(player_option_processor);

        utils::scrap_html(html, processor)
    }
}

type PlayerOptionProcessor = html::MapValue<Option<PlayerOption>, Option<PlayerOption>>;

fn player_option_processor() -> PlayerOptionProcessor {
    html::scope_processor(
        PLAYER_OPTION_SELECTOR,
        html::extract_value(|el| PlayerOption {
            post: el.attr("data-post").unwrap_or_default().trim().into(),
            nume: el.attr("data-nume").unwrap_or_default().trim().into(),
            kind: el.attr("data-type").unwrap_or_default().trim().into(),
        }),
    )
    .map(|opt| opt.filter(|option: &PlayerOption| !option.post.is_empty()))
}

pub struct IdlixContentSupplier {
    config: SiteConfig,
    processor_content_info_items: html::FilterProcessor<ContentInfo>,
    processor_search_items: html::FilterProcessor<ContentInfo>,
    processor_content_details: html::ContentDetailsProcessor,
    processor_player_count: Box<dyn DOMProcessor<u32>>,
}

impl Default for IdlixContentSupplier {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

impl IdlixContentSupplier {
    pub fn new(config: SiteConfig) -> Self {
        let base_url = config.base_url.clone();
        let search_base_url = config.base_url.clone();

        Self {
            processor_content_info_items: html::ItemsProcessor::new(
                ".item.movies, .item.tvshows",
                html::ContentInfoProcessor {
                    id: html::attr_value_map(".data h3 a", "href", move |href| {
                        extract_id_from_url(&base_url, &href).unwrap_or_default()
                    }),
                    title: html::text_value(".data h3 a"),
                    cover: html::attr_value_map(".poster img", "src", |src| {
                        utils::text::to_full_url(&src)
                    }),
                    genre: GENRE,
                }
                .boxed(),
            )
            .filter(is_complete),
            processor_search_items: html::ItemsProcessor::new(
                ".result-item, .search-item",
                html::ContentInfoProcessor {
                    id: html::MapValue::new(
                        move |link: String| {
                            extract_id_from_url(&search_base_url, &link).unwrap_or_default()
                        },
                        html::first_non_empty(vec![
                            html::attr_value(".title a", "href"),
                            html::attr_value("h3 a", "href"),
                        ]),
                    )
                    .boxed(),
                    title: html::first_non_empty(vec![
                        html::text_value(".title a"),
                        html::text_value("h3 a"),
                    ]),
                    cover: html::first_non_empty(vec![
                        html::attr_value(".thumbnail img", "src"),
                        html::attr_value("img", "src"),
                    ]),
                    genre: GENRE,
                }
                .boxed(),
            )
            .filter(is_complete),
            processor_content_details: html::ContentDetailsProcessor {
                title: html::text_value_or(".data h1", "Unknown"),
                description: html::TextValue::new()
                    .all_nodes()
                    .in_scope(".wp-content p")
                    .map(|opt| opt.map(|s| utils::text::sanitize_text(&s)).unwrap_or_default())
                    .boxed(),
                cover: html::attr_value(".poster img", "src"),
                genre: GENRE,
                total_episodes: 1,
            },
            processor_player_count: html::count_value(PLAYER_OPTION_SELECTOR),
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub async fn load_latest(&self, page: u16) -> anyhow::Result<Vec<ContentInfo>> {
        let url = self.config.latest_url(page);
        info!("[idlix] fetching latest from {url}");

        utils::scrap_page(
            utils::create_client()
                .get(&url)
                .timeout(self.config.page_timeout),
            &self.processor_content_info_items,
        )
        .await
    }

    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<ContentInfo>> {
        utils::scrap_page(
            utils::create_client()
                .get(format!("{}/", self.config.base_url))
                .query(&[("s", query)])
                .timeout(self.config.page_timeout),
            &self.processor_search_items,
        )
        .await
    }

    pub async fn get_content_details(&self, id: &str) -> anyhow::Result<Option<ContentDetailsPage>> {
        let slug = normalize_id(id);
        let url = self.config.item_url(slug);
        info!("[idlix] fetching detail from {url}");

        let response = utils::create_client()
            .get(&url)
            .timeout(self.config.page_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("[idlix] detail page status: {}", response.status());
            return Ok(None);
        }

        let page = response.text().await?;
        let document = scraper::Html::parse_document(&page);
        let root = document.root_element();

        let details: ContentDetails = self.processor_content_details.process(&root);
        let id = format!("{ID_PREFIX}{slug}");

        let media_items = if self.processor_player_count.process(&root) > 0 {
            vec![ContentMediaItem {
                id: id.clone(),
                index: 0,
                label: "Full Movie".into(),
            }]
        } else {
            vec![]
        };

        Ok(Some(ContentDetailsPage {
            id,
            details,
            media_items,
        }))
    }

    /// Resolves a playable url, logging and absorbing any failure.
    pub async fn resolve_stream(&self, id: &str, keyring: &KeyRing) -> Option<StreamResult> {
        match self.load_stream(id, keyring).await {
            Ok(result) => Some(result),
            Err(err) => {
                error!("[idlix] failed to resolve stream for {id}: {err}");
                None
            }
        }
    }

    pub async fn load_stream(
        &self,
        id: &str,
        keyring: &KeyRing,
    ) -> Result<StreamResult, ResolveError> {
        let url = self.config.item_url(normalize_id(id));
        info!("[idlix] fetching player options from {url}");

        let page = utils::load_text(
            utils::create_client()
                .get(&url)
                .timeout(self.config.page_timeout),
        )
        .await?;

        let option = PlayerOption::from_html(&page).ok_or(ResolveError::NoPlayerAvailable)?;

        let body = self.load_player_response(&option).await?;

        let text = if envelope::is_encrypted(&body) {
            let decrypted = decrypt_player_response(&body, keyring)?;
            payload::clean_decrypted(&decrypted)
        } else {
            body
        };

        let media_url = payload::extract_media_url(&text)?;

        Ok(StreamResult { media_url })
    }

    async fn load_player_response(&self, option: &PlayerOption) -> Result<String, ResolveError> {
        info!(
            "[idlix] posting to ajax: post={} nume={} type={}",
            option.post, option.nume, option.kind
        );

        let request = utils::create_client()
            .post(self.config.ajax_url())
            .header("Referer", &self.config.base_url)
            .header("Origin", &self.config.base_url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&[
                ("action", AJAX_ACTION),
                ("post", option.post.as_str()),
                ("nume", option.nume.as_str()),
                ("type", option.kind.as_str()),
            ])
            .timeout(self.config.ajax_timeout);

        Ok(utils::load_text(request).await?)
    }
}

fn decrypt_player_response(body: &str, keyring: &KeyRing) -> Result<String, ResolveError> {
    let envelope = Envelope::parse(body).map_err(|err| {
        warn!("[idlix] malformed envelope: {err}");
        ResolveError::DecryptionExhausted
    })?;

    let decrypted =
        envelope::decrypt_with_keys(&envelope, keyring.iter()).ok_or_else(|| {
            warn!("[idlix] failed to decrypt content with any of {} keys", keyring.len());
            ResolveError::DecryptionExhausted
        })?;

    info!("[idlix] decrypted successfully with key: {}", decrypted.key);

    Ok(decrypted.plaintext)
}

fn is_complete(info: &ContentInfo) -> bool {
    !info.id.is_empty() && !info.title.is_empty()
}

/// Site slug of an item id, with or without the `movie:` prefix.
pub fn normalize_id(id: &str) -> &str {
    id.strip_prefix(ID_PREFIX).unwrap_or(id).trim_matches('/')
}

/// Prefixed item id of a link under `base_url`.
pub fn extract_id_from_url(base_url: &str, link: &str) -> Option<String> {
    let slug = link.strip_prefix(base_url)?.trim_matches('/');

    (!slug.is_empty()).then(|| format!("{ID_PREFIX}{slug}"))
}
