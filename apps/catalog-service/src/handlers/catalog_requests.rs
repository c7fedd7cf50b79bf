//! Catalog request handler implementation

use super::Reply;
use crate::messaging::{MessageBroker, MessageStream, ReceivedMessage};
use domain_catalog::{pattern, CatalogDispatcher, ProductRepository};
use eyre::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

/// Handler serving catalog requests from the message broker
pub struct CatalogRequestHandler<B: MessageBroker, R: ProductRepository> {
    broker: Arc<B>,
    dispatcher: CatalogDispatcher<R>,
}

impl<B: MessageBroker, R: ProductRepository> CatalogRequestHandler<B, R> {
    pub fn new(broker: Arc<B>, dispatcher: CatalogDispatcher<R>) -> Self {
        Self { broker, dispatcher }
    }

    /// Run the handler until shutdown is signalled
    ///
    /// A single wildcard queue subscription covers every catalog pattern;
    /// the queue group load-balances requests across worker instances.
    pub async fn run(&self, queue_group: &str, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut stream = self
            .broker
            .queue_subscribe(pattern::ALL, queue_group)
            .await?;

        info!(
            subject = %pattern::ALL,
            queue_group = %queue_group,
            "Catalog request handler started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender counts as shutdown
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Shutdown signalled, stopping request loop");
                        break;
                    }
                }
                msg = stream.next() => {
                    let Some(msg) = msg else {
                        warn!("Message stream closed");
                        break;
                    };

                    if let Err(e) = self.handle_message(msg).await {
                        error!(error = %e, "Failed to handle message");
                    }
                }
            }
        }

        Ok(())
    }

    #[instrument(skip(self, msg), fields(subject = %msg.subject))]
    async fn handle_message(&self, msg: ReceivedMessage) -> Result<()> {
        let reply = Reply::from(self.dispatcher.dispatch(&msg.subject, &msg.payload).await);

        if let Reply::Error(body) = &reply {
            warn!(code = %body.code, message = %body.message, "Request failed");
        }

        // Fire-and-forget messages carry no reply subject
        if let Some(reply_subject) = &msg.reply {
            let payload = serde_json::to_vec(&reply)?;
            self.broker.publish_raw(reply_subject, &payload).await?;
        }

        Ok(())
    }
}
