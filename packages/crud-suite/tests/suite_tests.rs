//! End-to-end suite runs against the reference server.
//!
//! Each test owns its runtime so the whole run can be bounded by a timeout.

use std::future::Future;
use std::net::{SocketAddr, TcpListener};

use ntest::timeout;

use crud_suite::{Lookup, Suite, SuiteAbort, SuiteConfig, SuiteSummary};
use user_api_client::ClientConfig;
use user_api_stub::{spawn, spawn_local, StubConfig};
use user_api_types::UserPayload;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn config_for(base_url: String) -> SuiteConfig {
    SuiteConfig {
        client: ClientConfig {
            base_url,
            quiet: true,
            ..Default::default()
        },
        pause_ms: 1,
        ..Default::default()
    }
}

/// A full run against an empty server touches every phase
#[timeout(20000)]
#[test]
fn test_full_run_against_empty_server() {
    block_on(async {
        let stub = spawn_local().await.unwrap();
        let mut suite = Suite::new(config_for(stub.base_url())).unwrap().with_seed(11);

        let summary = suite.run().await.unwrap();
        assert_eq!(
            summary,
            SuiteSummary {
                created: 10,
                listed_after_create: 10,
                fetched: 10,
                matched: 10,
                updated: 10,
                verified: 10,
                deleted: 5,
                confirmed_deleted: 5,
                remaining: 5,
                rejected_probes: 3,
            }
        );

        // Users at odd positions survive, all carrying the update prefixes
        let survivors = stub.store().list();
        let ids: Vec<u64> = survivors.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 4, 6, 8, 10]);
        for user in &survivors {
            assert!(user.name.starts_with("Updated Test User "));
            assert!(user.email.starts_with("updated_testuser"));
            assert!(user.address.starts_with("Updated "));
        }
    });
}

/// Pre-existing users are counted but left alone
#[timeout(20000)]
#[test]
fn test_run_with_preexisting_users() {
    block_on(async {
        let stub = spawn_local().await.unwrap();
        for n in 0..3 {
            stub.store()
                .create(UserPayload::new(
                    format!("Existing {}", n),
                    format!("existing{}@example.com", n),
                    "",
                ))
                .unwrap();
        }

        let mut suite = Suite::new(config_for(stub.base_url())).unwrap();
        let summary = suite.run().await.unwrap();

        assert_eq!(summary.created, 10);
        assert!(summary.listed_after_create >= summary.created);
        assert_eq!(summary.listed_after_create, 13);
        assert_eq!(
            summary.listed_after_create - summary.remaining,
            summary.deleted
        );
        assert!(stub.store().get(1).unwrap().name.starts_with("Existing"));
    });
}

/// A server that reports DOWN stops the run before any user is created
#[timeout(10000)]
#[test]
fn test_unhealthy_server_aborts() {
    block_on(async {
        let config = StubConfig {
            health_status: "DOWN".to_string(),
            ..Default::default()
        };
        let stub = spawn(config, SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();

        let mut suite = Suite::new(config_for(stub.base_url())).unwrap();
        assert_eq!(suite.run().await, Err(SuiteAbort::HealthCheckFailed));
        assert!(stub.store().is_empty());
    });
}

/// Nothing listening is a health check failure, not a panic
#[timeout(10000)]
#[test]
fn test_unreachable_server_aborts() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    block_on(async {
        let mut suite = Suite::new(config_for(format!("http://{}", addr))).unwrap();
        assert_eq!(suite.run().await, Err(SuiteAbort::HealthCheckFailed));
    });
}

/// Zero successful creations stop the run after the create phase
#[timeout(10000)]
#[test]
fn test_nothing_created_aborts() {
    block_on(async {
        let stub = spawn_local().await.unwrap();
        let config = SuiteConfig {
            user_count: 0,
            ..config_for(stub.base_url())
        };

        let mut suite = Suite::new(config).unwrap();
        assert_eq!(suite.run().await, Err(SuiteAbort::NothingCreated));
    });
}

/// Servers answering DELETE with 200 and a body are accepted too
#[timeout(20000)]
#[test]
fn test_delete_returning_entity_is_accepted() {
    block_on(async {
        let config = StubConfig {
            delete_returns_entity: true,
            ..Default::default()
        };
        let stub = spawn(config, SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();

        let mut suite = Suite::new(SuiteConfig {
            user_count: 4,
            ..config_for(stub.base_url())
        })
        .unwrap();
        let summary = suite.run().await.unwrap();

        assert_eq!(summary.created, 4);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.confirmed_deleted, 2);
        assert_eq!(summary.remaining, 2);
    });
}

/// An odd user count deletes the rounded-up half
#[timeout(20000)]
#[test]
fn test_odd_user_count_deletes_even_positions() {
    block_on(async {
        let stub = spawn_local().await.unwrap();
        let mut suite = Suite::new(SuiteConfig {
            user_count: 3,
            ..config_for(stub.base_url())
        })
        .unwrap();

        let summary = suite.run().await.unwrap();
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.remaining, 1);
        assert_eq!(stub.store().list()[0].id, 2);
    });
}

/// Writes the server acknowledges but never applies show up in the counts
#[timeout(20000)]
#[test]
fn test_unapplied_writes_are_detected() {
    block_on(async {
        let config = StubConfig {
            drop_address: true,
            ignore_updates: true,
            ignore_deletes: true,
            ..Default::default()
        };
        let stub = spawn(config, SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();

        let mut suite = Suite::new(SuiteConfig {
            user_count: 4,
            ..config_for(stub.base_url())
        })
        .unwrap()
        .with_seed(3);
        let summary = suite.run().await.unwrap();

        assert_eq!(
            summary,
            SuiteSummary {
                created: 4,
                listed_after_create: 4,
                fetched: 4,
                matched: 0,
                updated: 4,
                verified: 0,
                deleted: 2,
                confirmed_deleted: 0,
                remaining: 4,
                rejected_probes: 3,
            }
        );
        assert!(summary.matched < summary.fetched);
        assert!(summary.verified < summary.updated);
        assert!(summary.confirmed_deleted < summary.deleted);

        // The first user was "deleted" but is still served
        let kept = suite.exerciser().get_user(1).await;
        assert!(matches!(kept, Lookup::Found(ref user) if user.name.starts_with("Test User 1 ")));
    });
}
