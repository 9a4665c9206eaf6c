use core::fmt::Write as _;

use embassy_time::Duration;
use heapless::String;

use crate::command::network::types::NetworkMode;

/// Longest topic or username built by the helpers below.
pub const MAX_TOPIC_LEN: usize = 128;

/// IoT hub MQTT api version appended to the username.
const API_VERSION: &str = "2021-04-12";

/// Connection parameters supplied once at start-up.
///
/// Credentials are provisioned externally; the password carries the access
/// token for the broker.
#[derive(Debug, Clone)]
pub struct SessionConfig<'a> {
    pub device_id: &'a str,
    pub apn: &'a str,
    pub broker_host: &'a str,
    pub broker_port: u16,
    pub username: &'a str,
    pub password: &'a str,
    pub subscribe_topic: &'a str,
    pub publish_topic: &'a str,
    /// Deep sleep duration between two cycles.
    pub telemetry_interval: Duration,
}

pub trait CellularConfig<'a> {
    /// Attempts per gated stage before the device is restarted.
    const MAX_RETRIES: u8 = 3;

    const NETWORK_MODE: NetworkMode = NetworkMode::LteNb;
    const REPORT_NETWORK_MODE: bool = false;

    const KEEP_ALIVE_SECS: u16 = 60;

    /// Number of telemetry messages published per cycle.
    const TELEMETRY_MESSAGES: usize = 2;

    /// Replaces the settle time of every command when set.
    const SETTLE_OVERRIDE: Option<Duration> = None;

    fn session(&self) -> &SessionConfig<'a>;
}

/// `devices/<device_id>/messages/devicebound/#`
pub fn devicebound_topic(device_id: &str) -> Option<String<MAX_TOPIC_LEN>> {
    let mut topic = String::new();
    write!(topic, "devices/{}/messages/devicebound/#", device_id).ok()?;
    Some(topic)
}

/// `devices/<device_id>/messages/events/`
pub fn events_topic(device_id: &str) -> Option<String<MAX_TOPIC_LEN>> {
    let mut topic = String::new();
    write!(topic, "devices/{}/messages/events/", device_id).ok()?;
    Some(topic)
}

/// `<hub>.azure-devices.net/<device_id>/?api-version=...`
pub fn hub_username(hub: &str, device_id: &str) -> Option<String<MAX_TOPIC_LEN>> {
    let mut username = String::new();
    write!(
        username,
        "{}.azure-devices.net/{}/?api-version={}",
        hub, device_id, API_VERSION
    )
    .ok()?;
    Some(username)
}
