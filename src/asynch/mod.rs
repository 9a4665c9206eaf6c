pub mod executor;
pub mod ingress;
pub mod network;
pub mod resources;
pub mod runner;
pub mod state;
pub mod supervisor;
pub mod telemetry;

use embassy_futures::select::{select, Either};
use embedded_io_async::{Read, Write};

use crate::config::CellularConfig;
use crate::error::Error;
use crate::traits::{PowerControl, SerialPort};

use ingress::Ingress;
use network::ModemDriver;
use resources::Resources;
use runner::{ConnectionLifecycle, CycleReport};

/// Build the lifecycle and its receive path on top of `resources`.
///
/// `tx` and `rx` are the two halves of the serial link to the module, `port`
/// controls the link itself.
pub fn new<
    'd,
    W: Write,
    R: Read,
    P: SerialPort,
    PWR: PowerControl,
    C: CellularConfig<'d>,
    const INGRESS_BUF_SIZE: usize,
    const CMD_BUF_SIZE: usize,
>(
    resources: &'d mut Resources<INGRESS_BUF_SIZE, CMD_BUF_SIZE>,
    tx: W,
    rx: R,
    port: P,
    power: PWR,
    config: C,
) -> (ConnectionLifecycle<'d, W, P, PWR, C>, Ingress<'d, R>) {
    let (executor, ingress) = resources.split(tx, rx, C::SETTLE_OVERRIDE);
    let driver = ModemDriver::new(executor, port, config);

    (ConnectionLifecycle::new(driver, power), ingress)
}

/// Run one wake cycle while servicing the receive path.
pub async fn run<'d, W, R, P, PWR, C>(
    lifecycle: &mut ConnectionLifecycle<'d, W, P, PWR, C>,
    ingress: &mut Ingress<'d, R>,
) -> Result<CycleReport, Error>
where
    W: Write,
    R: Read,
    P: SerialPort,
    PWR: PowerControl,
    C: CellularConfig<'d>,
{
    match select(lifecycle.run(), ingress.run()).await {
        Either::First(report) => report,
        Either::Second(never) => never,
    }
}
