use embedded_io_async::ErrorKind;

use crate::asynch::supervisor::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // Lifecycle errors
    /// A gated stage used all of its attempts. The device has been restarted.
    RetryExhausted(Stage),

    // Transport errors
    Transport(ErrorKind),

    // Encoding errors
    CommandTooLong,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::RetryExhausted(stage) => defmt::write!(f, "RetryExhausted({})", stage.name()),
            Self::Transport(kind) => defmt::write!(f, "Transport({:?})", kind),
            Self::CommandTooLong => defmt::write!(f, "CommandTooLong"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::Transport(kind)
    }
}

impl Error {
    pub(crate) fn transport<E: embedded_io_async::Error>(e: E) -> Self {
        Self::Transport(e.kind())
    }
}
