use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Duration;
use embedded_io_async::{Read, Write};

use crate::classifier::ClassifiedResponse;

use super::executor::CommandExecutor;
use super::ingress::Ingress;

/// Responses in flight between the receive path and the executor.
///
/// At most one command is outstanding, so a single slot is enough.
pub(crate) const RESPONSE_CAPACITY: usize = 1;

pub(crate) type ResponseChannel = Channel<NoopRawMutex, ClassifiedResponse, RESPONSE_CAPACITY>;

/// Statically allocated buffers and channels shared by the lifecycle and the
/// receive path. Must outlive both.
pub struct Resources<const INGRESS_BUF_SIZE: usize, const CMD_BUF_SIZE: usize> {
    pub(crate) responses: ResponseChannel,
    pub(crate) cmd_buf: [u8; CMD_BUF_SIZE],
    pub(crate) ingress_buf: [u8; INGRESS_BUF_SIZE],
}

impl<const INGRESS_BUF_SIZE: usize, const CMD_BUF_SIZE: usize> Default
    for Resources<INGRESS_BUF_SIZE, CMD_BUF_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const INGRESS_BUF_SIZE: usize, const CMD_BUF_SIZE: usize>
    Resources<INGRESS_BUF_SIZE, CMD_BUF_SIZE>
{
    pub const fn new() -> Self {
        Self {
            responses: Channel::new(),
            cmd_buf: [0; CMD_BUF_SIZE],
            ingress_buf: [0; INGRESS_BUF_SIZE],
        }
    }

    /// Hand out the transmit and receive halves of the protocol engine.
    pub(crate) fn split<'d, W: Write, R: Read>(
        &'d mut self,
        tx: W,
        rx: R,
        settle_override: Option<Duration>,
    ) -> (CommandExecutor<'d, W>, Ingress<'d, R>) {
        let Self {
            responses,
            cmd_buf,
            ingress_buf,
        } = self;
        let responses: &'d ResponseChannel = responses;

        (
            CommandExecutor::new(tx, cmd_buf, responses.receiver(), settle_override),
            Ingress::new(rx, ingress_buf, responses.sender()),
        )
    }
}
