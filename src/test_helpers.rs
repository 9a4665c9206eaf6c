//! Scripted module and peripherals for driving the protocol engine in tests.

use core::cell::{Cell, RefCell};
use core::future::{poll_fn, Future};
use core::task::Poll;
use std::boxed::Box;
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embassy_futures::select::{select, Either};
use embassy_time::Duration;
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};

use crate::asynch::ingress::Ingress;
use crate::config::{CellularConfig, SessionConfig};
use crate::traits::{PowerControl, SerialPort};

pub const ZERO_SETTLE: Option<Duration> = Some(Duration::from_millis(0));

type Responder = Box<dyn FnMut(&str) -> Option<Vec<u8>>>;

/// Both directions of a serial link to a scripted module.
///
/// Every write is recorded and answered by the responder, whose reply is
/// queued as one receive frame.
pub struct ModemLink {
    rx: RefCell<VecDeque<Vec<u8>>>,
    sent: RefCell<Vec<String>>,
    responder: RefCell<Responder>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
}

impl ModemLink {
    pub fn new(responder: impl FnMut(&str) -> Option<Vec<u8>> + 'static) -> Self {
        Self {
            rx: RefCell::new(VecDeque::new()),
            sent: RefCell::new(Vec::new()),
            responder: RefCell::new(Box::new(responder)),
            fail_writes: Cell::new(false),
            fail_reads: Cell::new(false),
        }
    }

    /// A module that never answers.
    pub fn silent() -> Self {
        Self::new(|_| None)
    }

    pub fn tx(&self) -> MockTx<'_> {
        MockTx(self)
    }

    pub fn rx(&self) -> MockRx<'_> {
        MockRx(self)
    }

    pub fn push_frame(&self, frame: &[u8]) {
        self.rx.borrow_mut().push_back(frame.to_vec());
    }

    pub fn has_pending_rx(&self) -> bool {
        !self.rx.borrow().is_empty()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Everything written so far, one entry per write without the line
    /// terminator.
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

pub struct MockTx<'a>(&'a ModemLink);

impl ErrorType for MockTx<'_> {
    type Error = ErrorKind;
}

impl Write for MockTx<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.0.fail_writes.get() {
            return Err(ErrorKind::BrokenPipe);
        }

        let text = String::from_utf8_lossy(buf);
        let cmd = text.trim_end_matches(['\r', '\n']);
        self.0.sent.borrow_mut().push(cmd.into());

        let reply = (&mut *self.0.responder.borrow_mut())(cmd);
        if let Some(reply) = reply {
            self.0.push_frame(&reply);
        }
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct MockRx<'a>(&'a ModemLink);

impl ErrorType for MockRx<'_> {
    type Error = ErrorKind;
}

impl Read for MockRx<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.0.fail_reads.get() {
            return Err(ErrorKind::NotConnected);
        }

        poll_fn(|_cx| {
            let mut rx = self.0.rx.borrow_mut();
            let Some(mut frame) = rx.pop_front() else {
                return Poll::Pending;
            };
            let len = frame.len().min(buf.len());
            buf[..len].copy_from_slice(&frame[..len]);
            if len < frame.len() {
                rx.push_front(frame.split_off(len));
            }
            Poll::Ready(Ok(len))
        })
        .await
    }
}

/// Drive `f` to completion while the receive path runs next to it.
pub fn drive<R: Read, F: Future>(ingress: &mut Ingress<'_, R>, f: F) -> F::Output {
    embassy_futures::block_on(async {
        match select(f, ingress.run()).await {
            Either::First(output) => output,
            Either::Second(never) => never,
        }
    })
}

#[derive(Default)]
pub struct PortState {
    /// Number of upcoming opens that fail.
    pub open_failures: Cell<usize>,
    pub open: Cell<bool>,
    pub opens: Cell<usize>,
    pub closes: Cell<usize>,
}

pub struct MockPort<'a>(pub &'a PortState);

impl SerialPort for MockPort<'_> {
    type Error = ErrorKind;

    fn open(&mut self) -> Result<(), Self::Error> {
        let failures = self.0.open_failures.get();
        if failures > 0 {
            self.0.open_failures.set(failures - 1);
            return Err(ErrorKind::NotFound);
        }
        self.0.open.set(true);
        self.0.opens.set(self.0.opens.get() + 1);
        Ok(())
    }

    fn close(&mut self) {
        self.0.open.set(false);
        self.0.closes.set(self.0.closes.get() + 1);
    }

    fn is_open(&self) -> bool {
        self.0.open.get()
    }
}

#[derive(Default)]
pub struct PowerLog {
    pub restarts: Cell<usize>,
    pub sleeps: RefCell<Vec<Duration>>,
}

pub struct MockPower<'a>(pub &'a PowerLog);

impl PowerControl for MockPower<'_> {
    fn restart(&mut self) {
        self.0.restarts.set(self.0.restarts.get() + 1);
    }

    async fn deep_sleep(&mut self, wake_after: Duration) {
        self.0.sleeps.borrow_mut().push(wake_after);
    }
}

pub struct TestConfig {
    session: SessionConfig<'static>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                device_id: "itnext01",
                apn: "sam.iot-provider.com",
                broker_host: "itnext.azure-devices.net",
                broker_port: 8883,
                username: "itnext.azure-devices.net/itnext01/?api-version=2021-04-12",
                password: "SharedAccessSignature sr=itnext",
                subscribe_topic: "devices/itnext01/messages/devicebound/#",
                publish_topic: "devices/itnext01/messages/events/",
                telemetry_interval: Duration::from_secs(300),
            },
        }
    }
}

impl<'a> CellularConfig<'a> for TestConfig {
    const SETTLE_OVERRIDE: Option<Duration> = ZERO_SETTLE;

    fn session(&self) -> &SessionConfig<'a> {
        &self.session
    }
}
