//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;

use cooler_client::HttpFetch;
use cooler_core::prelude::*;

use crate::message::{Message, Payload};
use crate::resource::ResourceKind;
use crate::UpdateAction;

/// Execute an action by spawning background tasks
pub fn handle_action<F>(action: UpdateAction, msg_tx: &mpsc::Sender<Message>, fetcher: &Arc<F>)
where
    F: HttpFetch + Sync + 'static,
{
    match action {
        UpdateAction::Fetch { resource, seq } => {
            spawn_fetch(resource, seq, msg_tx.clone(), Arc::clone(fetcher));
        }

        UpdateAction::Batch(actions) => {
            for action in actions {
                handle_action(action, msg_tx, fetcher);
            }
        }
    }
}

/// Spawn one request; its outcome comes back as `Message::Fetched`
///
/// Requests are never cancelled. If the engine is gone by the time the
/// answer arrives, the send fails and the answer is dropped.
pub fn spawn_fetch<F>(
    resource: ResourceKind,
    seq: u64,
    msg_tx: mpsc::Sender<Message>,
    fetcher: Arc<F>,
) where
    F: HttpFetch + Sync + 'static,
{
    tokio::spawn(async move {
        let result = fetch(fetcher.as_ref(), resource).await;
        match &result {
            Err(e) if e.is_recoverable() => warn!("Fetching {} failed: {}", resource, e),
            Err(e) => error!("Fetching {} failed, retrying will not help: {}", resource, e),
            Ok(_) => {}
        }

        let msg = Message::Fetched {
            resource,
            seq,
            result: result.map_err(|e| e.to_string()),
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("Dropping {} response #{}: engine stopped", resource, seq);
        }
    });
}

/// GET and decode one resource
pub async fn fetch<F>(fetcher: &F, resource: ResourceKind) -> Result<Payload>
where
    F: HttpFetch + Sync,
{
    let body = fetcher.get_text(resource.endpoint()).await?;
    resource.decode(&body)
}
