//! ### 5 / 6 - Network and application network Commands
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::{AppNetworkAction, ContextId, NetworkMode, NetworkModeReporting};

/// 5.2.x Preferred network system mode +CNSMOD
///
/// Switches the radio access technology. The module needs roughly five
/// seconds to settle on the new mode, which is included in the timeout.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CNSMOD", NoResponse, timeout_ms = 6000)]
pub struct SetNetworkSystemMode {
    #[at_arg(position = 0)]
    pub reporting: NetworkModeReporting,
    #[at_arg(position = 1)]
    pub mode: NetworkMode,
}

/// 3.2.x Signal quality report +CSQ
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", NoResponse)]
pub struct GetSignalQuality;

/// 3.2.x Operator selection +COPS
///
/// Read command only, returns the currently selected operator.
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS?", NoResponse)]
pub struct GetOperatorSelection;

/// 5.2.x Get network APN in CAT-M or NB-IoT +CGNAPN
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGNAPN", NoResponse)]
pub struct GetNetworkApn;

/// 5.2.x PDP context definition +CGDCONT
///
/// Defines the connection parameters for a PDP context, identified by the
/// local context identification parameter <cid>. The definition is persistent
/// over power cycles.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGDCONT", NoResponse)]
pub struct SetPDPContextDefinition<'a> {
    #[at_arg(position = 0)]
    pub cid: ContextId,
    #[at_arg(position = 1, len = 6)]
    pub pdp_type: &'a str,
    #[at_arg(position = 2, len = 99)]
    pub apn: &'a str,
}

/// 6.2.x APP network active +CNACT
///
/// Activates or deactivates the application network bound to <pdpidx>.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CNACT", NoResponse)]
pub struct SetAppNetworkActive {
    #[at_arg(position = 0)]
    pub pdp_index: u8,
    #[at_arg(position = 1)]
    pub action: AppNetworkAction,
}

/// 6.2.x APP network active +CNACT
///
/// Read command, reports state and local IP of every PDP index.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CNACT?", NoResponse)]
pub struct GetAppNetworkActive;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::encode;

    #[test]
    fn pdp_context_quotes_strings() {
        let cmd = SetPDPContextDefinition {
            cid: ContextId(1),
            pdp_type: "IP",
            apn: "sam.iot-provider.com",
        };
        assert_eq!(encode(&cmd), "AT+CGDCONT=1,\"IP\",\"sam.iot-provider.com\"");
    }

    #[test]
    fn network_mode_and_activation() {
        let cmd = SetNetworkSystemMode {
            reporting: false.into(),
            mode: NetworkMode::LteNb,
        };
        assert_eq!(encode(&cmd), "AT+CNSMOD=0,9");

        let cmd = SetAppNetworkActive {
            pdp_index: 0,
            action: AppNetworkAction::AutoActivate,
        };
        assert_eq!(encode(&cmd), "AT+CNACT=0,2");

        assert_eq!(encode(&GetOperatorSelection), "AT+COPS?");
    }
}
