//! Argument and parameter types used by MQTT(S) Application Commands

use atat::atat_derive::AtatEnum;

/// MQTT quality of service level
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum Qos {
    AtMostOnce = 0,
    AtLeastOnce = 1,
    ExactlyOnce = 2,
}

/// Whether the broker should retain a published message
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum Retain {
    No = 0,
    Yes = 1,
}

/// Parameter tags accepted by +SMCONF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MqttParameter {
    ClientId,
    KeepTime,
    CleanSession,
    Qos,
    Username,
    Password,
}

impl MqttParameter {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::ClientId => "CLIENTID",
            Self::KeepTime => "KEEPTIME",
            Self::CleanSession => "CLEANSS",
            Self::Qos => "QOS",
            Self::Username => "USERNAME",
            Self::Password => "PASSWORD",
        }
    }
}
