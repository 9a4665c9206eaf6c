//! ### 18 - MQTT(S) Application Commands
//!
//! The MQTT client lives in the module firmware. Connection parameters are set
//! one by one with +SMCONF before +SMCONN opens the session; publishing is a
//! two step exchange where +SMPUB announces topic and length and the payload
//! follows as raw bytes.
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use atat::serde_at::ser::Bytes;
use types::{Qos, Retain};

/// Longest payload accepted by [`MqttPublishPayload`].
pub const MAX_PAYLOAD_LEN: usize = 256;

/// 18.2.1 Set MQTT parameter +SMCONF, text valued
///
/// Used for CLIENTID, USERNAME and PASSWORD. The password carries the access
/// token, hence the generous length.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMCONF", NoResponse)]
pub struct SetMqttParameter<'a> {
    #[at_arg(position = 0, len = 16)]
    pub tag: &'a str,
    #[at_arg(position = 1, len = 256)]
    pub value: &'a str,
}

/// 18.2.1 Set MQTT parameter +SMCONF, numeric valued
///
/// Used for KEEPTIME, CLEANSS and QOS.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMCONF", NoResponse)]
pub struct SetMqttNumericParameter<'a> {
    #[at_arg(position = 0, len = 16)]
    pub tag: &'a str,
    #[at_arg(position = 1)]
    pub value: u16,
}

/// 18.2.1 Set MQTT parameter +SMCONF, server URL and port
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMCONF=\"URL\",", NoResponse, value_sep = false)]
pub struct SetMqttServer<'a> {
    #[at_arg(position = 0, len = 128)]
    pub host: &'a str,
    #[at_arg(position = 1)]
    pub port: u16,
}

/// 18.2.3 MQTT connection +SMCONN
///
/// The broker handshake (including TLS) runs inside the module and takes a
/// few seconds.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMCONN", NoResponse, timeout_ms = 5000)]
pub struct MqttConnect;

/// 18.2.4 Send packet +SMPUB
///
/// Announces a publish of <length> bytes; the module answers with a `>` prompt
/// and reads exactly that many bytes afterwards.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMPUB", NoResponse)]
pub struct PrepareMqttPublish<'a> {
    #[at_arg(position = 0, len = 128)]
    pub topic: &'a str,
    #[at_arg(position = 1)]
    pub length: usize,
    #[at_arg(position = 2)]
    pub qos: Qos,
    #[at_arg(position = 3)]
    pub retain: Retain,
}

/// Raw payload following a [`PrepareMqttPublish`]
#[derive(AtatCmd)]
#[at_cmd("", NoResponse, value_sep = false, cmd_prefix = "")]
pub struct MqttPublishPayload<'a> {
    #[at_arg(position = 0, len = 256)]
    pub data: Bytes<'a>,
}

/// 18.2.5 Subscribe packet +SMSUB
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMSUB", NoResponse)]
pub struct MqttSubscribe<'a> {
    #[at_arg(position = 0, len = 128)]
    pub topic: &'a str,
    #[at_arg(position = 1)]
    pub qos: Qos,
}

/// 18.2.6 Unsubscribe packet +SMUNSUB
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMUNSUB", NoResponse)]
pub struct MqttUnsubscribe<'a> {
    #[at_arg(position = 0, len = 128)]
    pub topic: &'a str,
}

/// 18.2.8 Inquire MQTT connection status +SMSTATE
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMSTATE?", NoResponse)]
pub struct GetMqttState;

/// 18.2.2 Disconnect MQTT +SMDISC
#[derive(Clone, AtatCmd)]
#[at_cmd("+SMDISC", NoResponse)]
pub struct MqttDisconnect;
