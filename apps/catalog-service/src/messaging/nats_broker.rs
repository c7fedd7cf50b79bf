//! NATS implementation of the MessageBroker trait

use super::{MessageBroker, MessageStream, ReceivedMessage};
use async_nats::{Client, Subscriber};
use async_trait::async_trait;
use eyre::{Result, WrapErr};

/// NATS-based message broker implementation
pub struct NatsBroker {
    client: Client,
}

impl NatsBroker {
    /// Connect to NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        let client = async_nats::connect(url)
            .await
            .wrap_err_with(|| format!("Failed to connect to NATS at {}", url))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl MessageBroker for NatsBroker {
    async fn publish_raw(&self, subject: &str, payload: &[u8]) -> Result<()> {
        self.client
            .publish(subject.to_string(), payload.to_vec().into())
            .await
            .wrap_err("Failed to publish raw message")?;
        Ok(())
    }

    async fn queue_subscribe(
        &self,
        subject: &str,
        queue_group: &str,
    ) -> Result<Box<dyn MessageStream>> {
        let subscriber = self
            .client
            .queue_subscribe(subject.to_string(), queue_group.to_string())
            .await
            .wrap_err_with(|| format!("Failed to queue subscribe to {}", subject))?;

        Ok(Box::new(NatsMessageStream { subscriber }))
    }

    async fn flush(&self) -> Result<()> {
        self.client
            .flush()
            .await
            .wrap_err("Failed to flush outgoing messages")?;
        Ok(())
    }
}

/// NATS message stream wrapper
struct NatsMessageStream {
    subscriber: Subscriber,
}

#[async_trait]
impl MessageStream for NatsMessageStream {
    async fn next(&mut self) -> Option<ReceivedMessage> {
        use futures::StreamExt;

        self.subscriber.next().await.map(|msg| ReceivedMessage {
            subject: msg.subject.to_string(),
            payload: msg.payload.to_vec(),
            reply: msg.reply.map(|s| s.to_string()),
        })
    }
}
