use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::Timer;
use embedded_io_async::{Error as _, Read};

use crate::classifier::{classify, ClassifiedResponse};

use super::resources::RESPONSE_CAPACITY;

/// Receive path of the module.
///
/// Every completed read is one frame. It is classified right away and handed
/// to whoever is waiting on the outstanding command.
pub struct Ingress<'d, R: Read> {
    rx: R,
    buf: &'d mut [u8],
    responses: Sender<'d, NoopRawMutex, ClassifiedResponse, RESPONSE_CAPACITY>,
}

impl<'d, R: Read> Ingress<'d, R> {
    pub(crate) fn new(
        rx: R,
        buf: &'d mut [u8],
        responses: Sender<'d, NoopRawMutex, ClassifiedResponse, RESPONSE_CAPACITY>,
    ) -> Self {
        Self { rx, buf, responses }
    }

    /// Read one frame and forward its classification.
    pub async fn read_frame(&mut self) {
        match self.rx.read(self.buf).await {
            Ok(0) => embassy_futures::yield_now().await,
            Ok(len) => {
                info!("Read {} bytes", len);
                let response = classify(&self.buf[..len]);
                self.responses.send(response).await;
            }
            Err(e) => {
                warn!("Failed to read from serial port: {:?}", e.kind());
                Timer::after(crate::module_timing::read_error_backoff()).await;
            }
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.read_frame().await;
        }
    }
}
