use crate::classifier::ClassifiedResponse;
use crate::location::LocationResult;

/// Position of the module in the bring-up sequence.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleState {
    Idle = 0,
    SerialOpen = 1,
    NetworkModeSet = 2,
    NetworkAttach = 3,
    BrokerConnect = 4,
    Subscribed = 5,
    Located = 6,
    TelemetrySent = 7,
    Teardown = 8,
}

/// Attempt counter and outcome of the stage currently under supervision.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryState {
    pub attempt: u8,
    pub succeeded: bool,
}

/// Mutable state of one bring-up cycle.
///
/// Owned by the lifecycle and lent to the executor while a command settles,
/// which is the only place responses are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleContext {
    retry: RetryState,
    location: Option<LocationResult>,
    state: LifecycleState,
}

impl Default for LifecycleContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleContext {
    pub const fn new() -> Self {
        Self {
            retry: RetryState {
                attempt: 0,
                succeeded: false,
            },
            location: None,
            state: LifecycleState::Idle,
        }
    }

    /// Apply a classified response to the stage outcome.
    pub fn apply(&mut self, response: ClassifiedResponse) {
        match response {
            ClassifiedResponse::Ack => {
                debug!("Acknowledged");
                self.retry.succeeded = true;
            }
            ClassifiedResponse::ProtocolError(e) => {
                warn!("Module reported error: {:?}", e);
                self.retry.succeeded = false;
            }
            ClassifiedResponse::Location(location) => {
                info!("Location: {:?}", location);
                self.location = Some(location);
                self.retry.succeeded = true;
            }
            ClassifiedResponse::Unrecognized(text) => {
                trace!("Ignoring frame: {:?}", text.as_str());
            }
        }
    }

    /// Mark the current attempt as successful without a module response.
    pub fn record_success(&mut self) {
        self.retry.succeeded = true;
    }

    /// Start the next attempt and return its number, starting at 1.
    pub fn begin_attempt(&mut self) -> u8 {
        self.retry.attempt = self.retry.attempt.saturating_add(1);
        self.retry.succeeded = false;
        self.retry.attempt
    }

    pub fn reset_retry(&mut self) {
        self.retry = RetryState::default();
    }

    pub fn retry(&self) -> RetryState {
        self.retry
    }

    pub fn location(&self) -> Option<&LocationResult> {
        self.location.as_ref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn set_state(&mut self, state: LifecycleState) {
        if self.state != state {
            debug!("State transition: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Forget everything from a previous cycle.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ProtocolError;
    use heapless::String;

    #[test]
    fn responses_drive_outcome() {
        let mut ctx = LifecycleContext::new();
        assert_eq!(ctx.begin_attempt(), 1);
        assert!(!ctx.retry().succeeded);

        ctx.apply(ClassifiedResponse::Ack);
        assert!(ctx.retry().succeeded);

        ctx.apply(ClassifiedResponse::ProtocolError(ProtocolError::Error));
        assert!(!ctx.retry().succeeded);

        ctx.apply(ClassifiedResponse::Unrecognized(String::new()));
        assert!(!ctx.retry().succeeded);
    }

    #[test]
    fn unrecognized_keeps_success() {
        let mut ctx = LifecycleContext::new();
        ctx.begin_attempt();
        ctx.apply(ClassifiedResponse::Ack);
        ctx.apply(ClassifiedResponse::Unrecognized(String::new()));
        assert!(ctx.retry().succeeded);
    }

    #[test]
    fn location_is_stored() {
        let mut ctx = LifecycleContext::new();
        ctx.begin_attempt();
        ctx.apply(ClassifiedResponse::Location(LocationResult::unknown()));
        assert!(ctx.retry().succeeded);
        assert_eq!(ctx.location(), Some(&LocationResult::unknown()));
    }

    #[test]
    fn new_attempt_clears_outcome() {
        let mut ctx = LifecycleContext::new();
        ctx.begin_attempt();
        ctx.record_success();
        assert_eq!(ctx.begin_attempt(), 2);
        assert!(!ctx.retry().succeeded);

        ctx.reset_retry();
        assert_eq!(ctx.retry(), RetryState::default());
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut ctx = LifecycleContext::new();
        ctx.set_state(LifecycleState::Located);
        ctx.apply(ClassifiedResponse::Location(LocationResult::unknown()));
        ctx.clear();
        assert_eq!(ctx, LifecycleContext::new());
        assert_eq!(ctx.state(), LifecycleState::Idle);
    }
}
