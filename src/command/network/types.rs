//! Argument and parameter types used by Network Commands

use atat::atat_derive::{AtatEnum, AtatLen};
use serde::{Deserialize, Serialize};

/// Radio access technology selected with +CNSMOD
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkMode {
    /// • 1: GSM
    Gsm = 1,
    /// • 3: EGPRS
    Egprs = 3,
    /// • 7: LTE CAT-M1
    LteM1 = 7,
    /// • 9: LTE NB-IoT
    LteNb = 9,
}

impl NetworkMode {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gsm => "GSM",
            Self::Egprs => "EGPRS",
            Self::LteM1 => "LTE M1",
            Self::LteNb => "LTE NB",
        }
    }
}

/// Automatic reporting of network system mode changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum NetworkModeReporting {
    Disabled = 0,
    Enabled = 1,
}

impl From<bool> for NetworkModeReporting {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Action on an application network PDP index, +CNACT
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum AppNetworkAction {
    /// • 0: deactivate
    Deactivate = 0,
    /// • 1: activate
    Activate = 1,
    /// • 2: auto activate, the module assigns the IP address
    AutoActivate = 2,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, AtatLen)]
pub struct ContextId(pub u8);
