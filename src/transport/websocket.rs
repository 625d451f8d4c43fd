use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::status::Subscription;
use crate::transport::http::AppState;
use crate::transport::message::ServerMessage;

pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Stream the overview to one client: a snapshot first, then every update
/// the hub fans out to this subscriber.
async fn handle_socket(socket: WebSocket, state: AppState) {
    // Subscribe before taking the snapshot so no transition falls in between.
    let Subscription { id, mut receiver } = state.hub.subscribe();
    info!(subscriber = %id, "live feed client connected");

    let (mut sender, mut incoming) = socket.split();

    let snapshot = ServerMessage::snapshot(state.hub.snapshot());
    if send_message(&mut sender, &snapshot).await {
        loop {
            tokio::select! {
                update = receiver.recv() => match update {
                    Some(update) => {
                        if !send_message(&mut sender, &ServerMessage::update(&update)).await {
                            break;
                        }
                    }
                    None => {
                        debug!(subscriber = %id, "subscription closed");
                        break;
                    }
                },
                frame = incoming.next() => match frame {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(subscriber = %id, error = %e, "live feed read error");
                        break;
                    }
                    // Pings are answered by axum; anything else is ignored.
                    Some(Ok(_)) => {}
                },
                () = state.shutdown.cancelled() => break,
            }
        }
    }

    state.hub.unsubscribe(&id);
    let _ = sender.send(Message::Close(None)).await;
    info!(subscriber = %id, "live feed client disconnected");
}

async fn send_message(sender: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to serialize live feed message");
            return true;
        }
    };
    match sender.send(Message::Text(json.into())).await {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "failed to send to live feed client");
            false
        }
    }
}
