//! AMQP 0.9.1 event publisher.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lapin::options::{
    BasicPublishOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};

use crate::config::PublisherConfig;
use crate::domain::events::{APP_ID, EventMessage, ROUTING_KEY};
use crate::domain::publisher::EventPublisher;
use crate::error::AppError;

/// Publisher over one long-lived channel.
///
/// The direct exchange, the queue and the binding are declared once at
/// startup; `publish` is safe to call concurrently on the shared channel.
pub struct AmqpPublisher {
    connection: Connection,
    channel: Channel,
    exchange_name: String,
}

impl AmqpPublisher {
    /// Connects to the broker and declares the exchange/queue/binding.
    pub async fn connect(config: &PublisherConfig) -> Result<Self> {
        let connection = Connection::connect(&config.uri, ConnectionProperties::default())
            .await
            .context("failed to connect to the broker")?;
        let channel = connection
            .create_channel()
            .await
            .context("failed to open a broker channel")?;

        channel
            .exchange_declare(
                &config.exchangename,
                ExchangeKind::Direct,
                ExchangeDeclareOptions::default(),
                FieldTable::default(),
            )
            .await
            .context("failed to declare exchange")?;
        channel
            .queue_declare(
                &config.queuename,
                QueueDeclareOptions::default(),
                FieldTable::default(),
            )
            .await
            .context("failed to declare queue")?;
        channel
            .queue_bind(
                &config.queuename,
                &config.exchangename,
                ROUTING_KEY,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .context("failed to bind queue")?;

        tracing::info!(
            exchange = %config.exchangename,
            queue = %config.queuename,
            "stats publisher started"
        );

        Ok(Self {
            connection,
            channel,
            exchange_name: config.exchangename.clone(),
        })
    }

    /// Closes the underlying connection. Called after the server has
    /// drained, before the database pool goes down.
    pub async fn close(&self) -> Result<()> {
        self.connection
            .close(200, "shutting down")
            .await
            .context("error during broker connection closing")
    }
}

#[async_trait]
impl EventPublisher for AmqpPublisher {
    async fn publish(&self, message: &EventMessage) -> Result<(), AppError> {
        let payload = serde_json::to_vec(message)
            .map_err(|e| AppError::broker(format!("failed to encode event payload: {e}")))?;

        // Kind and timestamp travel as message properties, not in the body.
        let properties = BasicProperties::default()
            .with_content_type("application/json".into())
            .with_kind(message.kind.as_str().into())
            .with_timestamp(message.timestamp.timestamp() as u64)
            .with_app_id(APP_ID.into());

        self.channel
            .basic_publish(
                &self.exchange_name,
                ROUTING_KEY,
                BasicPublishOptions::default(),
                &payload,
                properties,
            )
            .await
            .map_err(|e| {
                metrics::counter!("rotation_publish_failures_total").increment(1);
                AppError::broker(format!("failed to publish event: {e}"))
            })?
            .await
            .map_err(|e| {
                metrics::counter!("rotation_publish_failures_total").increment(1);
                AppError::broker(format!("broker did not accept event: {e}"))
            })?;
        Ok(())
    }
}
