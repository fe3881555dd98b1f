//! Checks against the live site. Run with `--ignored`.

use crate::{
    config::SiteConfig,
    suppliers::idlix::{IdlixContentSupplier, keyring::KeyRing},
};

#[test_log::test(tokio::test)]
#[ignore = "hits the live site"]
async fn should_load_latest() {
    let supplier = IdlixContentSupplier::default();
    let res = supplier.load_latest(1).await.unwrap();
    println!("{res:#?}");
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live site"]
async fn should_search() {
    let supplier = IdlixContentSupplier::default();
    let res = supplier.search("avengers").await.unwrap();
    println!("{res:#?}");
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live site"]
async fn should_discover_keys() {
    let keyring = KeyRing::discover(&SiteConfig::default()).await;
    println!("{:#?}", keyring.keys());
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live site"]
async fn should_resolve_stream() {
    let supplier = IdlixContentSupplier::default();
    let latest = supplier.load_latest(1).await.unwrap();
    let keyring = KeyRing::discover(supplier.config()).await;

    let Some(item) = latest.first() else {
        return;
    };

    let details = supplier.get_content_details(&item.id).await.unwrap();
    println!("{details:#?}");

    let res = supplier.resolve_stream(&item.id, &keyring).await;
    println!("{res:#?}");
}
