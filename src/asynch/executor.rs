use atat::AtatCmd;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Instant, Timer};
use embedded_io_async::Write;

use crate::classifier::ClassifiedResponse;
use crate::error::Error;
use crate::module_timing::settle_time;

use super::resources::RESPONSE_CAPACITY;
use super::state::LifecycleContext;

/// Sends AT commands and holds the caller for each command's settle time.
///
/// Nothing is returned to the caller. Responses arriving while a command
/// settles are applied to the [`LifecycleContext`], and the stage reads the
/// outcome from there.
pub struct CommandExecutor<'d, W: Write> {
    tx: W,
    buf: &'d mut [u8],
    responses: Receiver<'d, NoopRawMutex, ClassifiedResponse, RESPONSE_CAPACITY>,
    settle_override: Option<Duration>,
}

impl<'d, W: Write> CommandExecutor<'d, W> {
    pub(crate) fn new(
        tx: W,
        buf: &'d mut [u8],
        responses: Receiver<'d, NoopRawMutex, ClassifiedResponse, RESPONSE_CAPACITY>,
        settle_override: Option<Duration>,
    ) -> Self {
        Self {
            tx,
            buf,
            responses,
            settle_override,
        }
    }

    pub async fn execute<Cmd: AtatCmd>(&mut self, ctx: &mut LifecycleContext, cmd: &Cmd) {
        match self.send(cmd).await {
            Ok(()) => {}
            Err(Error::CommandTooLong) => {
                error!(
                    "Command needs {} bytes, buffer holds {}. Skipped",
                    Cmd::MAX_LEN,
                    self.buf.len()
                );
                return;
            }
            Err(e) => warn!("Failed to write command: {:?}", e),
        }

        self.settle(ctx, settle_time(Cmd::MAX_TIMEOUT_MS, self.settle_override))
            .await;
    }

    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<(), Error> {
        if Cmd::MAX_LEN > self.buf.len() {
            return Err(Error::CommandTooLong);
        }
        let len = cmd.write(self.buf);
        let bytes = &self.buf[..len];
        debug!("Sending command: {:?}", core::str::from_utf8(bytes).ok());

        self.tx.write_all(bytes).await.map_err(Error::transport)?;
        self.tx.flush().await.map_err(Error::transport)
    }

    /// Apply responses until the deadline, then whatever is already queued.
    async fn settle(&mut self, ctx: &mut LifecycleContext, settle: Duration) {
        let deadline = Instant::now() + settle;
        loop {
            match select(Timer::at(deadline), self.responses.receive()).await {
                Either::First(()) => break,
                Either::Second(response) => ctx.apply(response),
            }
        }
        while let Ok(response) = self.responses.try_receive() {
            ctx.apply(response);
        }
    }
}
