use embassy_time::Duration;

/// Control half of the serial link to the module.
///
/// Reading and writing go through `embedded_io_async`; this only covers
/// opening and closing the port.
pub trait SerialPort {
    type Error: embedded_io_async::Error;

    fn open(&mut self) -> Result<(), Self::Error>;
    fn close(&mut self);
    fn is_open(&self) -> bool;
}

/// Device level power management.
pub trait PowerControl {
    /// Reset the whole device. On hardware this does not return.
    fn restart(&mut self);

    /// Arm the wake timer and enter deep sleep.
    async fn deep_sleep(&mut self, wake_after: Duration);
}
