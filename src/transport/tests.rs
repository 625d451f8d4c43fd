use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;
use serde_json::json;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;

use super::{AppState, Overview, ServerMessage, StatusResponse, create_router};
use crate::status::{Status, StatusHub, StatusUpdate, TargetStatus};
use crate::test_support::spawn_server;

fn seeded_hub() -> Arc<StatusHub> {
    let hub = Arc::new(StatusHub::default());
    hub.set_status(&StatusUpdate::new("web", Status::Offline, Duration::ZERO));
    hub.set_status(&StatusUpdate::new("api", Status::Online, Duration::ZERO));
    hub
}

async fn spawn_query(hub: Arc<StatusHub>, shutdown: CancellationToken) -> SocketAddr {
    spawn_server(create_router(AppState::new(hub, shutdown))).await
}

async fn next_message<S>(stream: &mut S) -> ServerMessage
where
    S: Stream<Item = Result<WsMessage, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("no live feed message")
            .expect("live feed closed")
            .expect("live feed error");
        if let WsMessage::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("server message json");
        }
    }
}

async fn wait_for_no_subscribers(hub: &StatusHub) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while hub.subscriber_count() != 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscription was not removed");
}

#[test]
fn test_server_message_wire_format() {
    let update = StatusUpdate::new("api", Status::Offline, Duration::from_millis(250));
    let value = serde_json::to_value(ServerMessage::update(&update)).unwrap();
    assert_eq!(value["type"], "update");
    assert_eq!(value["server"], "api");
    assert_eq!(value["status"], "offline");
    assert_eq!(value["duration_ms"], 250);

    let snapshot = ServerMessage::snapshot(vec![TargetStatus {
        name: "api".to_string(),
        status: Status::Online,
    }]);
    let value = serde_json::to_value(snapshot).unwrap();
    assert_eq!(value["type"], "snapshot");
    assert_eq!(value["servers"], json!([{ "name": "api", "status": "online" }]));
}

#[tokio::test]
async fn test_status_endpoint_json_and_simple() {
    let addr = spawn_query(seeded_hub(), CancellationToken::new()).await;

    let response = reqwest::get(format!("http://{addr}/status/api")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: StatusResponse = response.json().await.unwrap();
    assert_eq!(
        body,
        StatusResponse {
            server: "api".to_string(),
            status: Status::Online,
        }
    );

    let simple = reqwest::get(format!("http://{addr}/status/web/?mode=simple"))
        .await
        .unwrap();
    assert_eq!(simple.status(), StatusCode::OK);
    assert_eq!(simple.text().await.unwrap(), "offline");
}

#[tokio::test]
async fn test_status_endpoint_unknown_target() {
    let addr = spawn_query(seeded_hub(), CancellationToken::new()).await;

    for path in ["/status/nope", "/status/nope/"] {
        let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_overview_is_sorted() {
    let addr = spawn_query(seeded_hub(), CancellationToken::new()).await;

    let overview: Overview = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = overview.servers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["api", "web"]);
}

#[tokio::test]
async fn test_live_feed_sends_snapshot_then_updates() {
    let hub = seeded_hub();
    let addr = spawn_query(hub.clone(), CancellationToken::new()).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/overviewUpdates"))
        .await
        .unwrap();

    match next_message(&mut ws).await {
        ServerMessage::Snapshot { servers, .. } => {
            assert_eq!(servers.len(), 2);
            assert_eq!(servers[0].name, "api");
        }
        other => panic!("expected a snapshot, got {other:?}"),
    }
    assert_eq!(hub.subscriber_count(), 1);

    hub.set_status(&StatusUpdate::new("web", Status::Online, Duration::from_millis(3)));
    match next_message(&mut ws).await {
        ServerMessage::Update {
            server,
            status,
            duration_ms,
            ..
        } => {
            assert_eq!(server, "web");
            assert_eq!(status, Status::Online);
            assert_eq!(duration_ms, 3);
        }
        other => panic!("expected an update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_live_feed_unsubscribes_on_client_close() {
    let hub = seeded_hub();
    let addr = spawn_query(hub.clone(), CancellationToken::new()).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/overviewUpdates/"))
        .await
        .unwrap();
    next_message(&mut ws).await;
    assert_eq!(hub.subscriber_count(), 1);

    ws.close(None).await.unwrap();
    drop(ws);

    wait_for_no_subscribers(&hub).await;
}

#[tokio::test]
async fn test_live_feed_ends_on_shutdown() {
    let hub = seeded_hub();
    let shutdown = CancellationToken::new();
    let addr = spawn_query(hub.clone(), shutdown.clone()).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/overviewUpdates"))
        .await
        .unwrap();
    next_message(&mut ws).await;

    shutdown.cancel();

    let ended = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                None | Some(Err(_)) | Some(Ok(WsMessage::Close(_))) => break,
                Some(Ok(_)) => {}
            }
        }
    })
    .await;
    assert!(ended.is_ok(), "live feed stayed open after shutdown");
    wait_for_no_subscribers(&hub).await;
}

#[tokio::test]
async fn test_live_feed_ends_when_hub_shuts_down() {
    let hub = seeded_hub();
    let addr = spawn_query(hub.clone(), CancellationToken::new()).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/overviewUpdates"))
        .await
        .unwrap();
    next_message(&mut ws).await;

    hub.shutdown();

    let ended = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                None | Some(Err(_)) | Some(Ok(WsMessage::Close(_))) => break,
                Some(Ok(_)) => {}
            }
        }
    })
    .await;
    assert!(ended.is_ok(), "live feed stayed open after hub shutdown");
}
