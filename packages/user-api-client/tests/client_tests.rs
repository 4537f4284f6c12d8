//! Status mapping of the typed client against the reference server.

use std::net::SocketAddr;

use user_api_client::{ClientConfig, ClientError, UserApiClient};
use user_api_stub::{spawn, spawn_local, StubConfig};
use user_api_types::UserPayload;

fn client_for(base_url: String) -> UserApiClient {
    let config = ClientConfig {
        base_url,
        quiet: true,
        timeout_ms: Some(5000),
        ..Default::default()
    };
    UserApiClient::new(&config).unwrap()
}

fn payload(n: u32) -> UserPayload {
    UserPayload::new(
        format!("User {}", n),
        format!("user{}@example.com", n),
        "1 Main St",
    )
}

#[tokio::test]
async fn test_health_up() {
    let stub = spawn_local().await.unwrap();
    let health = client_for(stub.base_url()).health().await.unwrap();
    assert!(health.is_up());
}

#[tokio::test]
async fn test_health_down_is_unexpected_status() {
    let config = StubConfig {
        health_status: "DOWN".to_string(),
        ..Default::default()
    };
    let stub = spawn(config, SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let err = client_for(stub.base_url()).health().await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 503 }));
}

#[tokio::test]
async fn test_crud_round_trip() {
    let stub = spawn_local().await.unwrap();
    let client = client_for(stub.base_url());

    let created = client.create_user(&payload(1)).await.unwrap();
    assert_eq!(created.id, 1);
    assert!(created.matches(&payload(1)));

    assert_eq!(client.list_users().await.unwrap(), vec![created.clone()]);
    assert_eq!(client.get_user(created.id).await.unwrap(), created);

    let updated = client.update_user(created.id, &payload(2)).await.unwrap();
    assert_eq!(updated.email, "user2@example.com");

    client.delete_user(created.id).await.unwrap();
    let err = client.get_user(created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_accepts_ok_with_body() {
    let config = StubConfig {
        delete_returns_entity: true,
        ..Default::default()
    };
    let stub = spawn(config, SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let client = client_for(stub.base_url());

    let created = client.create_user(&payload(1)).await.unwrap();
    client.delete_user(created.id).await.unwrap();
    assert!(stub.store().is_empty());
}

#[tokio::test]
async fn test_missing_id_maps_to_not_found() {
    let stub = spawn_local().await.unwrap();
    let client = client_for(stub.base_url());

    assert!(client.get_user(999999).await.unwrap_err().is_not_found());
    assert!(client
        .update_user(999999, &payload(1))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(client.delete_user(999999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_conflict_is_unexpected_status() {
    let stub = spawn_local().await.unwrap();
    let client = client_for(stub.base_url());

    client.create_user(&payload(1)).await.unwrap();
    let err = client.create_user(&payload(1)).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(!err.is_not_found());
}
