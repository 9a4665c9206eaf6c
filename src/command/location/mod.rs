//! ### 12 - LBS Application Commands
//!
//! Base station based positioning. The module asks the LBS server for a fix
//! derived from the serving cell and reports it in a `+CLBS:` response.
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::{LbsConfigOperation, LbsParameter, LocationType};

/// Marker that opens every location response.
pub const LOCATION_MARKER: &str = "+CLBS:";

/// 12.2.1 Base station location configuration +CLBSCFG
#[derive(Clone, AtatCmd)]
#[at_cmd("+CLBSCFG", NoResponse)]
pub struct ConfigureLocationServer {
    #[at_arg(position = 0)]
    pub operation: LbsConfigOperation,
    #[at_arg(position = 1)]
    pub parameter: LbsParameter,
}

/// 12.2.2 Base station location +CLBS
///
/// Answered by `+CLBS: <locationcode>[,<longitude>,<latitude>,<acc>]`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CLBS", NoResponse)]
pub struct GetLocation {
    #[at_arg(position = 0)]
    pub kind: LocationType,
    #[at_arg(position = 1)]
    pub pdp_index: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::encode;

    #[test]
    fn location_query() {
        let cmd = ConfigureLocationServer {
            operation: LbsConfigOperation::Read,
            parameter: LbsParameter::ServerAddress,
        };
        assert_eq!(encode(&cmd), "AT+CLBSCFG=0,3");

        let cmd = GetLocation {
            kind: LocationType::LongitudeLatitude,
            pdp_index: 0,
        };
        assert_eq!(encode(&cmd), "AT+CLBS=1,0");
    }
}
