use super::state::LifecycleContext;

/// Gated stages of the bring-up, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    SerialOpen,
    NetworkAttach,
    BrokerConnect,
    Subscribe,
    Locate,
}

impl Stage {
    pub const COUNT: usize = 5;

    pub const ALL: [Stage; Self::COUNT] = [
        Stage::SerialOpen,
        Stage::NetworkAttach,
        Stage::BrokerConnect,
        Stage::Subscribe,
        Stage::Locate,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::SerialOpen => "SerialPort",
            Self::NetworkAttach => "APN",
            Self::BrokerConnect => "MQTT",
            Self::Subscribe => "Subscribe",
            Self::Locate => "Location",
        }
    }
}

/// Performs a single attempt of a stage.
///
/// The outcome is not returned; it is left in the context by the responses
/// applied while the attempt's commands settle.
pub trait StageDriver {
    async fn attempt(&mut self, stage: Stage, ctx: &mut LifecycleContext);
}

/// Bounded retry loop around one stage. There is no backoff besides the
/// settle time of the commands themselves.
#[derive(Debug, Clone, Copy)]
pub struct StageRetrySupervisor {
    max_retries: u8,
}

impl StageRetrySupervisor {
    /// `max_retries` is the total number of attempts, at least one is made.
    pub const fn new(max_retries: u8) -> Self {
        Self { max_retries }
    }

    pub async fn run_stage<D: StageDriver>(
        &self,
        driver: &mut D,
        ctx: &mut LifecycleContext,
        stage: Stage,
    ) -> bool {
        loop {
            let attempt = ctx.begin_attempt();
            info!("[{}] Attempt {}", stage.name(), attempt);

            driver.attempt(stage, ctx).await;

            if ctx.retry().succeeded {
                info!("[{}] Ok", stage.name());
                return true;
            }
            if attempt >= self.max_retries {
                error!("[{}] Failed after {} attempts", stage.name(), attempt);
                return false;
            }
            warn!("[{}] Attempt {} failed", stage.name(), attempt);
        }
    }
}
