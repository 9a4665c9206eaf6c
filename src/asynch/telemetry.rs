use core::fmt::Write as _;

use atat::serde_at::ser::Bytes;
use embedded_io_async::Write;
use heapless::String;

use crate::command::mqtt::types::{Qos, Retain};
use crate::command::mqtt::{MqttPublishPayload, PrepareMqttPublish, MAX_PAYLOAD_LEN};
use crate::location::LocationResult;

use super::executor::CommandExecutor;
use super::state::LifecycleContext;

/// Longest payload produced by [`compose`].
pub const COMPOSED_PAYLOAD_LEN: usize = 64;

/// Publishes telemetry on the uplink topic of the connected session.
///
/// Fire-and-forget: replies to the publish are applied to the context like
/// any other response but never gate the lifecycle.
pub struct TelemetryPublisher<'d> {
    topic: &'d str,
}

impl<'d> TelemetryPublisher<'d> {
    pub fn new(topic: &'d str) -> Self {
        Self { topic }
    }

    /// Publish every payload in turn and return how many were sent.
    pub async fn publish<W, I>(
        &self,
        executor: &mut CommandExecutor<'_, W>,
        ctx: &mut LifecycleContext,
        payloads: I,
    ) -> usize
    where
        W: Write,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut sent = 0;
        for payload in payloads {
            if self.publish_one(executor, ctx, payload.as_ref()).await {
                sent += 1;
            }
        }
        sent
    }

    async fn publish_one<W: Write>(
        &self,
        executor: &mut CommandExecutor<'_, W>,
        ctx: &mut LifecycleContext,
        payload: &str,
    ) -> bool {
        let data = payload.as_bytes();
        if data.len() > MAX_PAYLOAD_LEN {
            warn!(
                "Payload of {} bytes exceeds {} bytes, not published",
                data.len(),
                MAX_PAYLOAD_LEN
            );
            return false;
        }

        executor
            .execute(
                ctx,
                &PrepareMqttPublish {
                    topic: self.topic,
                    length: data.len(),
                    qos: Qos::AtLeastOnce,
                    retain: Retain::Yes,
                },
            )
            .await;
        executor
            .execute(ctx, &MqttPublishPayload { data: Bytes(data) })
            .await;

        info!("Published {}", payload);
        true
    }
}

/// `<index>:<location>`, with `unknown` when no location was decoded.
pub fn compose(
    index: usize,
    location: Option<&LocationResult>,
) -> Option<String<COMPOSED_PAYLOAD_LEN>> {
    let mut payload = String::new();
    match location {
        Some(location) => write!(payload, "{}:{}", index, location).ok()?,
        None => write!(payload, "{}:unknown", index).ok()?,
    }
    Some(payload)
}
