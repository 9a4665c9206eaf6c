//! AT Commands for the SIMCom SIM7080 module family\
//! Following the SIM7070_SIM7080_SIM7090 Series AT Command Manual, limited to
//! the network, MQTT(S) and LBS application command groups the bring-up uses.

pub mod location;
pub mod mqtt;
pub mod network;

use atat::atat_derive::AtatResp;

#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[cfg(test)]
pub(crate) fn encode<C: atat::AtatCmd>(cmd: &C) -> std::string::String {
    let mut buf = [0u8; 512];
    let len = cmd.write(&mut buf);
    std::string::String::from_utf8_lossy(&buf[..len])
        .trim_end()
        .into()
}
