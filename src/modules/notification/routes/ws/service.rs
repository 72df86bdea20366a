use crate::{modules::auth::middleware::Auth, types::Context};
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Streams the caller's order events as JSON text frames until either side
/// hangs up.
pub async fn service(ctx: Arc<Context>, auth: Auth, socket: WebSocket) {
    let user = auth.user;
    let user_id = user.id.clone();
    let (mut sender, mut receiver) = socket.split();
    let mut events = ctx.notifications.subscribe();

    tracing::debug!("Notification stream opened for user {}", user_id);

    let mut send_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if !event.is_visible_to(&user) {
                        continue;
                    }

                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(err) => {
                            tracing::error!("Failed to serialize order event: {}", err);
                            continue;
                        }
                    };

                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "Notification stream for user {} fell behind by {} event(s)",
                        user.id,
                        skipped
                    );
                    events = events.resubscribe();
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    tracing::debug!("Notification stream closed for user {}", user_id);
}
