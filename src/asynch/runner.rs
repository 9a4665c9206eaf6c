use embedded_io_async::Write;
use heapless::Vec;

use crate::config::CellularConfig;
use crate::error::Error;
use crate::location::LocationResult;
use crate::traits::{PowerControl, SerialPort};

use super::network::ModemDriver;
use super::state::{LifecycleContext, LifecycleState};
use super::supervisor::{Stage, StageRetrySupervisor};
use super::telemetry::{compose, TelemetryPublisher};

/// What happened during one bring-up cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Attempts used by every gated stage that ran, in order.
    pub attempts: Vec<(Stage, u8), { Stage::COUNT }>,
    pub location: Option<LocationResult>,
    /// Number of telemetry payloads handed to the module.
    pub published: usize,
}

impl CycleReport {
    pub fn attempts_for(&self, stage: Stage) -> Option<u8> {
        self.attempts
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, attempts)| *attempts)
    }
}

/// Sequential bring-up, telemetry and teardown of one wake cycle.
///
/// Must be driven together with the matching [`Ingress`](super::ingress::Ingress),
/// see [`run`](super::run).
pub struct ConnectionLifecycle<'d, W, P, PWR, C>
where
    W: Write,
    P: SerialPort,
    PWR: PowerControl,
    C: CellularConfig<'d>,
{
    driver: ModemDriver<'d, W, P, C>,
    power: PWR,
    supervisor: StageRetrySupervisor,
    telemetry: TelemetryPublisher<'d>,
    ctx: LifecycleContext,
}

impl<'d, W, P, PWR, C> ConnectionLifecycle<'d, W, P, PWR, C>
where
    W: Write,
    P: SerialPort,
    PWR: PowerControl,
    C: CellularConfig<'d>,
{
    pub(crate) fn new(driver: ModemDriver<'d, W, P, C>, power: PWR) -> Self {
        let topic = driver.config().session().publish_topic;
        Self {
            driver,
            power,
            supervisor: StageRetrySupervisor::new(C::MAX_RETRIES),
            telemetry: TelemetryPublisher::new(topic),
            ctx: LifecycleContext::new(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.ctx.state()
    }

    /// Run one full cycle and end in deep sleep.
    ///
    /// A stage that exhausts its retries restarts the device and returns
    /// [`Error::RetryExhausted`] without tearing anything down.
    pub async fn run(&mut self) -> Result<CycleReport, Error> {
        self.ctx.clear();
        let mut report = CycleReport::default();

        self.gate(Stage::SerialOpen, LifecycleState::SerialOpen, &mut report)
            .await?;

        self.driver.set_network_mode(&mut self.ctx).await;
        self.ctx.set_state(LifecycleState::NetworkModeSet);

        self.gate(
            Stage::NetworkAttach,
            LifecycleState::NetworkAttach,
            &mut report,
        )
        .await?;
        self.gate(
            Stage::BrokerConnect,
            LifecycleState::BrokerConnect,
            &mut report,
        )
        .await?;
        self.gate(Stage::Subscribe, LifecycleState::Subscribed, &mut report)
            .await?;
        self.gate(Stage::Locate, LifecycleState::Located, &mut report)
            .await?;

        report.location = self.ctx.location().cloned();
        report.published = self.publish_telemetry(report.location.clone()).await;
        self.ctx.set_state(LifecycleState::TelemetrySent);

        self.ctx.set_state(LifecycleState::Teardown);
        self.driver.teardown(&mut self.ctx).await;
        self.ctx.set_state(LifecycleState::Idle);

        let interval = self.driver.config().session().telemetry_interval;
        info!("Sleeping for {} s", interval.as_secs());
        self.power.deep_sleep(interval).await;

        Ok(report)
    }

    async fn gate(
        &mut self,
        stage: Stage,
        reached: LifecycleState,
        report: &mut CycleReport,
    ) -> Result<(), Error> {
        let ok = self
            .supervisor
            .run_stage(&mut self.driver, &mut self.ctx, stage)
            .await;

        // Capacity matches the number of stages
        let _ = report.attempts.push((stage, self.ctx.retry().attempt));
        self.ctx.reset_retry();

        if ok {
            self.ctx.set_state(reached);
            Ok(())
        } else {
            error!("[{}] Retries exhausted, restarting device", stage.name());
            self.power.restart();
            Err(Error::RetryExhausted(stage))
        }
    }

    async fn publish_telemetry(&mut self, location: Option<LocationResult>) -> usize {
        let payloads =
            (0..C::TELEMETRY_MESSAGES).filter_map(|i| compose(i, location.as_ref()));
        self.telemetry
            .publish(self.driver.executor(), &mut self.ctx, payloads)
            .await
    }
}
