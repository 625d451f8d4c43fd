//! Helpers shared by the unit tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::notify::{NotificationSink, NotifyError};
use crate::status::StatusUpdate;

/// Serve `app` on an ephemeral localhost port and return its address.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    listener.local_addr().expect("local addr")
}

/// Sink that records every delivery and can be told to fail them all.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub delivered: Arc<Mutex<Vec<StatusUpdate>>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> Vec<StatusUpdate> {
        self.delivered.lock().clone()
    }
}

impl NotificationSink for RecordingSink {
    async fn deliver(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        self.delivered.lock().push(update.clone());
        if self.fail {
            return Err(NotifyError::Rejected {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}
