mod common;

use std::sync::Arc;

use driving_registry_backend::coordinators::AuthCoordinator;
use driving_registry_backend::errors::InternalError;
use driving_registry_backend::errors::internal::{AuthorizationError, WalletError};
use driving_registry_backend::stores::WalletLinkStore;
use driving_registry_backend::types::dto::auth::LinkWalletRequest;
use driving_registry_backend::types::internal::context::RequestContext;

fn link_request(identity_no: &str, wallet_address: &str) -> LinkWalletRequest {
    LinkWalletRequest {
        identity_no: identity_no.to_string(),
        wallet_address: wallet_address.to_string(),
    }
}

#[tokio::test]
async fn test_wallet_claimed_by_second_identity_conflicts() {
    let app_data = common::setup_app_data().await;
    common::register_user(&app_data, "111222333").await;
    common::register_user(&app_data, "444555666").await;
    let ctx = RequestContext::for_system("test");

    app_data
        .wallet_link_store
        .link(&ctx, "111222333", "0xABC")
        .await
        .unwrap();
    let second = app_data.wallet_link_store.link(&ctx, "444555666", "0xABC").await;

    assert!(matches!(
        second,
        Err(InternalError::Wallet(WalletError::AlreadyLinked { .. }))
    ));
    let (identity_no, _) = app_data
        .wallet_link_store
        .resolve_by_wallet(&ctx, "0xABC")
        .await
        .unwrap();
    assert_eq!(identity_no, "111222333");
}

#[tokio::test]
async fn test_concurrent_links_to_same_wallet_one_wins() {
    let app_data = common::setup_app_data().await;
    common::register_user(&app_data, "111222333").await;
    common::register_user(&app_data, "444555666").await;
    let store_a = WalletLinkStore::new(app_data.db.clone());
    let store_b = WalletLinkStore::new(app_data.db.clone());
    let ctx_a = RequestContext::for_system("link-a");
    let ctx_b = RequestContext::for_system("link-b");

    let (a, b) = tokio::join!(
        store_a.link(&ctx_a, "111222333", "0xRACE"),
        store_b.link(&ctx_b, "444555666", "0xRACE"),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(InternalError::Wallet(WalletError::AlreadyLinked { .. }))))
            .count(),
        1
    );

    let ctx = RequestContext::for_system("test");
    let linked_a = store_a.is_linked(&ctx, "111222333").await.unwrap();
    let linked_b = store_a.is_linked(&ctx, "444555666").await.unwrap();
    assert!(linked_a ^ linked_b);
}

#[tokio::test]
async fn test_check_wallet_false_for_unknown_identity() {
    let app_data = common::setup_app_data().await;
    let ctx = RequestContext::for_system("test");

    assert!(!app_data.wallet_link_store.is_linked(&ctx, "000000000").await.unwrap());
}

#[tokio::test]
async fn test_only_owner_or_admin_links_identity() {
    let app_data = common::setup_app_data().await;
    let coordinator = AuthCoordinator::new(Arc::clone(&app_data));
    common::register_user(&app_data, "111222333").await;
    let (_, intruder_token) = common::register_user(&app_data, "444555666").await;
    let (_, admin_token) = common::create_admin_with_token(&app_data, "999999999").await;

    let intruder_ctx = common::authenticated_context(&app_data, &intruder_token).await;
    let denied = coordinator
        .link_wallet(&intruder_ctx, link_request("111222333", "0xABC"))
        .await;
    assert!(matches!(
        denied,
        Err(InternalError::Authorization(AuthorizationError::NotOwnerOrAdmin { .. }))
    ));

    let admin_ctx = common::authenticated_context(&app_data, &admin_token).await;
    let linked = coordinator
        .link_wallet(&admin_ctx, link_request("111222333", "0xABC"))
        .await
        .unwrap();
    assert!(linked.linked);

    let status = coordinator
        .check_wallet(&RequestContext::for_system("test"), "111222333")
        .await
        .unwrap();
    assert!(status.linked);
}

#[tokio::test]
async fn test_unlink_then_relink_to_new_wallet() {
    let app_data = common::setup_app_data().await;
    let coordinator = AuthCoordinator::new(Arc::clone(&app_data));
    let (_, token) = common::register_user(&app_data, "111222333").await;
    let ctx = common::authenticated_context(&app_data, &token).await;

    coordinator
        .link_wallet(&ctx, link_request("111222333", "0xOLD"))
        .await
        .unwrap();
    coordinator.unlink_wallet(&ctx, "111222333").await.unwrap();
    coordinator
        .link_wallet(&ctx, link_request("111222333", "0xNEW"))
        .await
        .unwrap();

    let resolved = coordinator
        .resolve_wallet(&RequestContext::for_system("test"), "0xNEW")
        .await
        .unwrap();
    assert_eq!(resolved.identity_no, "111222333");
    assert!(matches!(
        coordinator
            .resolve_wallet(&RequestContext::for_system("test"), "0xOLD")
            .await,
        Err(InternalError::Wallet(WalletError::WalletNotFound { .. }))
    ));
}
