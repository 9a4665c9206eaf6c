use embedded_io_async::{Error as _, Write};

use crate::command::location::types::{LbsConfigOperation, LbsParameter, LocationType};
use crate::command::location::{ConfigureLocationServer, GetLocation};
use crate::command::mqtt::types::{MqttParameter, Qos};
use crate::command::mqtt::{
    GetMqttState, MqttConnect, MqttDisconnect, MqttSubscribe, MqttUnsubscribe,
    SetMqttNumericParameter, SetMqttParameter, SetMqttServer,
};
use crate::command::network::types::{AppNetworkAction, ContextId};
use crate::command::network::{
    GetAppNetworkActive, GetNetworkApn, GetOperatorSelection, GetSignalQuality,
    SetAppNetworkActive, SetNetworkSystemMode, SetPDPContextDefinition,
};
use crate::config::CellularConfig;
use crate::traits::SerialPort;

use super::executor::CommandExecutor;
use super::state::LifecycleContext;
use super::supervisor::{Stage, StageDriver};

/// PDP index the application network runs on.
const PDP_INDEX: u8 = 0;

/// Drives the module through the commands of each stage.
pub struct ModemDriver<'d, W: Write, P: SerialPort, C: CellularConfig<'d>> {
    executor: CommandExecutor<'d, W>,
    port: P,
    config: C,
}

impl<'d, W: Write, P: SerialPort, C: CellularConfig<'d>> ModemDriver<'d, W, P, C> {
    pub(crate) fn new(executor: CommandExecutor<'d, W>, port: P, config: C) -> Self {
        Self {
            executor,
            port,
            config,
        }
    }

    pub(crate) fn executor(&mut self) -> &mut CommandExecutor<'d, W> {
        &mut self.executor
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn open_port(&mut self, ctx: &mut LifecycleContext) {
        if self.port.is_open() {
            ctx.record_success();
            return;
        }
        match self.port.open() {
            Ok(()) => {
                info!("Serial port opened");
                ctx.record_success();
            }
            Err(e) => warn!("Failed to open serial port: {:?}", e.kind()),
        }
    }

    /// One-shot radio access technology selection, not retried.
    pub async fn set_network_mode(&mut self, ctx: &mut LifecycleContext) {
        info!("Setting network mode to {}", C::NETWORK_MODE.name());
        self.executor
            .execute(
                ctx,
                &SetNetworkSystemMode {
                    reporting: C::REPORT_NETWORK_MODE.into(),
                    mode: C::NETWORK_MODE,
                },
            )
            .await;
    }

    async fn attach(&mut self, ctx: &mut LifecycleContext) {
        let attempt = ctx.retry().attempt;
        let apn = self.config.session().apn;

        self.executor.execute(ctx, &GetSignalQuality).await;
        self.executor.execute(ctx, &GetOperatorSelection).await;
        self.executor.execute(ctx, &GetNetworkApn).await;
        self.executor
            .execute(
                ctx,
                &SetPDPContextDefinition {
                    cid: ContextId(1),
                    pdp_type: "IP",
                    apn,
                },
            )
            .await;

        if attempt > 2 {
            // A half-activated context refuses to auto activate again
            self.deactivate_network(ctx).await;
        }

        self.executor
            .execute(
                ctx,
                &SetAppNetworkActive {
                    pdp_index: PDP_INDEX,
                    action: AppNetworkAction::AutoActivate,
                },
            )
            .await;
        self.executor.execute(ctx, &GetAppNetworkActive).await;
    }

    async fn deactivate_network(&mut self, ctx: &mut LifecycleContext) {
        self.executor
            .execute(
                ctx,
                &SetAppNetworkActive {
                    pdp_index: PDP_INDEX,
                    action: AppNetworkAction::Deactivate,
                },
            )
            .await;
    }

    async fn connect_broker(&mut self, ctx: &mut LifecycleContext) {
        let session = self.config.session().clone();

        if ctx.retry().attempt > 1 {
            self.executor.execute(ctx, &MqttDisconnect).await;
        }

        self.executor
            .execute(
                ctx,
                &SetMqttParameter {
                    tag: MqttParameter::ClientId.tag(),
                    value: session.device_id,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &SetMqttNumericParameter {
                    tag: MqttParameter::KeepTime.tag(),
                    value: C::KEEP_ALIVE_SECS,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &SetMqttServer {
                    host: session.broker_host,
                    port: session.broker_port,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &SetMqttNumericParameter {
                    tag: MqttParameter::CleanSession.tag(),
                    value: 1,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &SetMqttNumericParameter {
                    tag: MqttParameter::Qos.tag(),
                    value: Qos::AtLeastOnce as u16,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &SetMqttParameter {
                    tag: MqttParameter::Username.tag(),
                    value: session.username,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &SetMqttParameter {
                    tag: MqttParameter::Password.tag(),
                    value: session.password,
                },
            )
            .await;

        info!("Connecting to {}:{}", session.broker_host, session.broker_port);
        self.executor.execute(ctx, &MqttConnect).await;
    }

    async fn subscribe(&mut self, ctx: &mut LifecycleContext) {
        let topic = self.config.session().subscribe_topic;
        self.executor
            .execute(
                ctx,
                &MqttSubscribe {
                    topic,
                    qos: Qos::AtLeastOnce,
                },
            )
            .await;
    }

    async fn locate(&mut self, ctx: &mut LifecycleContext) {
        self.executor
            .execute(
                ctx,
                &ConfigureLocationServer {
                    operation: LbsConfigOperation::Read,
                    parameter: LbsParameter::ServerAddress,
                },
            )
            .await;
        self.executor
            .execute(
                ctx,
                &GetLocation {
                    kind: LocationType::LongitudeLatitude,
                    pdp_index: PDP_INDEX,
                },
            )
            .await;
    }

    /// Undo the bring-up in reverse order. Outcomes are logged only.
    pub async fn teardown(&mut self, ctx: &mut LifecycleContext) {
        let topic = self.config.session().subscribe_topic;

        self.executor.execute(ctx, &GetMqttState).await;
        self.executor
            .execute(ctx, &MqttUnsubscribe { topic })
            .await;
        info!("Disconnecting from broker");
        self.executor.execute(ctx, &MqttDisconnect).await;
        self.deactivate_network(ctx).await;

        self.port.close();
        info!("Serial port closed");
    }
}

impl<'d, W: Write, P: SerialPort, C: CellularConfig<'d>> StageDriver
    for ModemDriver<'d, W, P, C>
{
    async fn attempt(&mut self, stage: Stage, ctx: &mut LifecycleContext) {
        match stage {
            Stage::SerialOpen => self.open_port(ctx),
            Stage::NetworkAttach => self.attach(ctx).await,
            Stage::BrokerConnect => self.connect_broker(ctx).await,
            Stage::Subscribe => self.subscribe(ctx).await,
            Stage::Locate => self.locate(ctx).await,
        }
    }
}
