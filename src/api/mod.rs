use crate::{
    config::SiteConfig,
    models::{ContentDetailsPage, ContentInfo, StreamResult},
    suppliers::idlix::{IdlixContentSupplier, keyring::KeyRing},
};

pub async fn load_latest(config: SiteConfig, page: u16) -> anyhow::Result<Vec<ContentInfo>> {
    IdlixContentSupplier::new(config).load_latest(page).await
}

pub async fn search(config: SiteConfig, query: &str) -> anyhow::Result<Vec<ContentInfo>> {
    IdlixContentSupplier::new(config).search(query).await
}

pub async fn get_content_details(
    config: SiteConfig,
    id: &str,
) -> anyhow::Result<Option<ContentDetailsPage>> {
    IdlixContentSupplier::new(config).get_content_details(id).await
}

/// Discovers the session keys, then resolves the stream. Failures are logged.
pub async fn resolve_stream(config: SiteConfig, id: &str) -> Option<StreamResult> {
    let keyring = KeyRing::discover(&config).await;

    IdlixContentSupplier::new(config)
        .resolve_stream(id, &keyring)
        .await
}
