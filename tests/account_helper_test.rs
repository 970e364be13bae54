//! AccountHelper over the on-disk account store.

mod common;

use common::{hosted_blog, self_hosted_blog, signed_in_snapshot, RecordingExperimentPlatform};
use site_insights::adapters::FileAccountStore;
use site_insights::config::AppFlavor;
use site_insights::experiments::AbTest;
use site_insights::session::AccountHelper;
use site_insights::traits::{AccountStore, NoopLogoutHooks};
use tempfile::TempDir;

async fn helper_with(
    dir: &TempDir,
    snapshot: Option<site_insights::models::AccountSnapshot>,
) -> AccountHelper<FileAccountStore> {
    let store = FileAccountStore::at(dir.path().join("nested").join("account.json"));
    if let Some(snapshot) = snapshot {
        store.save(&snapshot).await.expect("save snapshot");
    }
    AccountHelper::new(store)
}

#[tokio::test]
async fn test_fresh_install_is_logged_out() {
    let dir = TempDir::new().unwrap();
    let helper = helper_with(&dir, None).await;

    assert!(!helper.is_dotcom_available().await.unwrap());
    assert!(!helper.is_logged_in().await.unwrap());
    assert!(helper.no_self_hosted_blogs().await.unwrap());
    assert!(!helper.has_blogs().await.unwrap());

    let tree = helper.log_blogs_and_accounts().await.unwrap();
    assert!(tree.ends_with("No account/blogs configured on device"));
}

#[tokio::test]
async fn test_signed_in_device() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = signed_in_snapshot();
    snapshot.blogs.push(self_hosted_blog("garden"));
    let helper = helper_with(&dir, Some(snapshot)).await;

    assert!(helper.is_dotcom_available().await.unwrap());
    assert!(helper.is_logged_in().await.unwrap());
    assert!(!helper.no_self_hosted_blogs().await.unwrap());
    assert!(helper.has_blogs().await.unwrap());

    let tree = helper.log_blogs_and_accounts().await.unwrap();
    assert!(tree.starts_with("wp.com account: <Account username: tester ID: 7>\n"));
    assert!(tree.contains("<Account username: tester ID: 7> (default)\n└─ <Blog Name: tester"));
    assert!(tree.contains("<Self-Hosted>\n└─ <Blog Name: garden"));
}

#[tokio::test]
async fn test_logout_persists_to_disk() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = signed_in_snapshot();
    snapshot.blogs.push(hosted_blog("second"));
    snapshot.blogs.push(self_hosted_blog("garden"));
    let helper = helper_with(&dir, Some(snapshot)).await;

    let removed = helper
        .log_out_default_account(&NoopLogoutHooks)
        .await
        .unwrap();
    assert_eq!(removed.map(|a| a.username), Some("tester".to_string()));

    // Reload from disk through a fresh store
    let reloaded = FileAccountStore::at(helper.store().path())
        .load()
        .await
        .unwrap();
    assert!(reloaded.default_account.is_none());
    assert_eq!(reloaded.blogs.len(), 1);
    assert_eq!(reloaded.blogs[0].name, "garden");

    // A self-hosted site keeps the user logged in
    assert!(helper.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("account.json");
    tokio::fs::write(&path, b"{not json").await.unwrap();

    let helper = AccountHelper::new(FileAccountStore::at(&path));
    let err = helper.is_logged_in().await.unwrap_err();
    assert_eq!(err.error_code(), "E_SESSION_STORE");
}

#[tokio::test]
async fn test_experiments_start_only_when_logged_in() {
    let dir = TempDir::new().unwrap();
    let platform = RecordingExperimentPlatform::new();

    let logged_out = helper_with(&dir, None).await;
    assert!(!AbTest::start(
        &platform,
        logged_out.is_logged_in().await.unwrap(),
        AppFlavor::WordPress
    ));

    let dir = TempDir::new().unwrap();
    let logged_in = helper_with(&dir, Some(signed_in_snapshot())).await;
    assert!(AbTest::start(
        &platform,
        logged_in.is_logged_in().await.unwrap(),
        AppFlavor::WordPress
    ));
    assert_eq!(platform.refresh_count(), 1);
}
