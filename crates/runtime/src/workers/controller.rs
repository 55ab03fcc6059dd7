//! Control loop that owns the agent's mode, anchor and movement.
//!
//! Receives commands from [`AgentHandle`](crate::AgentHandle), runs the
//! decision tick and both supply schedulers, and publishes events to the
//! EventBus. Long work (movement, container operations) runs in spawned
//! tasks that report back through an internal channel, so the loop never
//! blocks on the world.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use hunter_core::{
    AgentConfig, AgentMode, AnchorChange, ChatCommand, EntityId, EntitySnapshot, ModeCommand,
    Position, SearchArea, TargetContext, nearest_target,
};

use crate::api::{Capabilities, FeedSettings, MovementError};
use crate::api::{AgentStatus, TickOutcome};
use crate::decision::{Decision, DecisionContext, DecisionTree, agent_tree, decide};
use crate::equipment::equip_weapon;
use crate::events::{AgentEvent, EventBus, SkipReason, TravelOutcome, TravelPurpose};
use crate::gate::ExclusionGate;
use crate::notify::Notifier;
use crate::operations::{
    self, BUSY_MESSAGE, OperationContext, OperationError, OperationKind, OperationReport,
};
use crate::repository::AnchorRepository;

/// Commands that can be sent to the controller
pub enum Command {
    /// A chat line seen in the world.
    Chat { sender: String, message: String },
    /// The combat capability gave up or finished its target.
    StoppedAttacking,
    /// Run one decision tick now.
    Tick { reply: oneshot::Sender<TickOutcome> },
    RunOperation {
        kind: OperationKind,
        reply: oneshot::Sender<Result<OperationReport, OperationError>>,
    },
    QueryStatus { reply: oneshot::Sender<AgentStatus> },
    Disconnect { reason: String },
}

/// Timer periods. `None` disables a timer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Schedule {
    pub tick: Option<Duration>,
    pub deposit: Option<Duration>,
    pub restock: Option<Duration>,
    pub startup_scan: Duration,
}

/// Reports from tasks spawned by the controller.
enum Internal {
    TravelFinished {
        transit: u64,
        purpose: TravelPurpose,
        result: Result<(), MovementError>,
    },
    OperationFinished {
        kind: OperationKind,
        result: Result<OperationReport, OperationError>,
    },
    StartupScan,
}

/// Who asked for an operation, and so how a refusal is reported.
enum Origin {
    Chat,
    Schedule,
    Request(oneshot::Sender<Result<OperationReport, OperationError>>),
}

/// Movement the controller started and still considers current.
#[derive(Clone, Copy, Debug)]
struct Transit {
    id: u64,
    purpose: TravelPurpose,
}

pub struct Controller {
    config: Arc<AgentConfig>,
    schedule: Schedule,
    ports: Capabilities,
    anchors: Arc<dyn AnchorRepository>,
    feed: FeedSettings,
    gate: ExclusionGate,
    notifier: Notifier,
    event_bus: EventBus,
    tree: DecisionTree,

    mode: AgentMode,
    transit: Option<Transit>,
    next_transit: u64,
    engaged: Option<EntityId>,
    /// A guard command arrived while an operation held the gate.
    post_pending: bool,

    command_rx: mpsc::Receiver<Command>,
    internal_tx: mpsc::Sender<Internal>,
    internal_rx: mpsc::Receiver<Internal>,
}

impl Controller {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: Arc<AgentConfig>,
        schedule: Schedule,
        ports: Capabilities,
        anchors: Arc<dyn AnchorRepository>,
        feed: FeedSettings,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        buffer: usize,
    ) -> Self {
        let (internal_tx, internal_rx) = mpsc::channel(buffer);
        let notifier = Notifier::new(Arc::clone(&ports.chat), event_bus.clone());

        Self {
            config,
            schedule,
            ports,
            anchors,
            feed,
            gate: ExclusionGate::new(),
            notifier,
            event_bus,
            tree: agent_tree(),
            mode: AgentMode::Idle,
            transit: None,
            next_transit: 0,
            engaged: None,
            post_pending: false,
            command_rx,
            internal_tx,
            internal_rx,
        }
    }

    /// Main controller loop.
    pub async fn run(mut self) {
        self.on_spawn().await;

        let mut decisions = self.schedule.tick.and_then(periodic);
        let mut deposits = self.schedule.deposit.and_then(periodic);
        let mut restocks = self.schedule.restock.and_then(periodic);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Disconnect { reason }) => {
                        info!(%reason, "Disconnected");
                        break;
                    }
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(message) = self.internal_rx.recv() => {
                    self.handle_internal(message).await;
                }
                _ = next_fire(&mut decisions) => {
                    self.decision_tick().await;
                }
                _ = next_fire(&mut deposits) => {
                    self.request_operation(OperationKind::Deposit, Origin::Schedule).await;
                }
                _ = next_fire(&mut restocks) => {
                    self.request_operation(OperationKind::Restock, Origin::Schedule).await;
                }
            }
        }

        self.ports.movement.cancel().await;
        info!("Controller stopped");
    }

    async fn on_spawn(&mut self) {
        info!(agent = self.ports.chat.own_name(), "Agent spawned");

        match self.ports.inventory.equip_best_armor().await {
            Ok(()) => info!("Best armor equipped"),
            Err(error) => warn!(%error, "Failed to equip armor"),
        }

        let min_hunger = self.feed.min_hunger;
        match self.ports.feed.enable(self.feed.clone()).await {
            Ok(()) => info!(min_hunger, foods = self.feed.foods.len(), "Auto-feed enabled"),
            Err(error) => warn!(%error, "Failed to enable auto-feed"),
        }

        match self.anchors.load() {
            Ok(Some(anchor)) => {
                info!(%anchor, "Restoring guard post");
                self.apply(ModeCommand::Restore { anchor }).await;
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "Failed to load guard anchor"),
        }

        info!(
            deposit = ?self.schedule.deposit,
            restock = ?self.schedule.restock,
            "Supply schedulers started"
        );

        let tx = self.internal_tx.clone();
        let delay = self.schedule.startup_scan;
        tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(Internal::StartupScan).await;
        });
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Chat { sender, message } => self.handle_chat(&sender, &message).await,
            Command::StoppedAttacking => {
                debug!("Combat capability stopped attacking");
                self.combat_ended().await;
            }
            Command::Tick { reply } => {
                let outcome = self.decision_tick().await;
                if reply.send(outcome).is_err() {
                    debug!("Tick reply channel closed (caller dropped)");
                }
            }
            Command::RunOperation { kind, reply } => {
                self.request_operation(kind, Origin::Request(reply)).await;
            }
            Command::QueryStatus { reply } => {
                if reply.send(self.status()).is_err() {
                    debug!("QueryStatus reply channel closed (caller dropped)");
                }
            }
            Command::Disconnect { .. } => {}
        }
    }

    async fn handle_internal(&mut self, message: Internal) {
        match message {
            Internal::TravelFinished {
                transit,
                purpose,
                result,
            } => {
                if self.transit.is_none_or(|current| current.id != transit) {
                    trace!(transit, %purpose, "Ignoring superseded movement");
                    return;
                }
                self.transit = None;

                let outcome = match result {
                    Ok(()) => {
                        info!(%purpose, "Arrived");
                        TravelOutcome::Arrived
                    }
                    Err(MovementError::Interrupted) => {
                        debug!(%purpose, "Movement interrupted");
                        TravelOutcome::Interrupted
                    }
                    Err(MovementError::Failed(reason)) => {
                        warn!(%purpose, %reason, "Movement failed");
                        TravelOutcome::Failed(reason)
                    }
                };
                self.event_bus
                    .publish(AgentEvent::MovementFinished { purpose, outcome });
            }
            Internal::OperationFinished { kind, result } => {
                match result {
                    Ok(report) => self
                        .event_bus
                        .publish(AgentEvent::TransactionFinished { kind, report }),
                    Err(error) => debug!(%kind, %error, "Operation ended without a report"),
                }
                self.take_pending_post();
            }
            Internal::StartupScan => self.scan(false).await,
        }
    }

    // ===== chat =====

    async fn handle_chat(&mut self, sender: &str, message: &str) {
        if sender == self.ports.chat.own_name() {
            return;
        }
        let Some(command) = ChatCommand::parse(message) else {
            return;
        };
        info!(%sender, %command, "Chat command");

        match command {
            ChatCommand::Restock => {
                self.notifier.say(OperationKind::Restock.acknowledgement()).await;
                self.request_operation(OperationKind::Restock, Origin::Chat).await;
            }
            ChatCommand::Deposit => {
                self.notifier.say(OperationKind::Deposit.acknowledgement()).await;
                self.request_operation(OperationKind::Deposit, Origin::Chat).await;
            }
            ChatCommand::Scan => self.scan(true).await,
            ChatCommand::Guard => match self.ports.world.player_position(sender).await {
                Ok(Some(at)) => {
                    self.apply(ModeCommand::Guard { at }).await;
                    self.notifier.say("Guarding this spot.").await;
                }
                Ok(None) => self.notifier.say("I can't see you.").await,
                Err(error) => warn!(%error, %sender, "Could not locate speaker"),
            },
            ChatCommand::Stop => {
                self.apply(ModeCommand::Stop).await;
                self.notifier.say("Stopped hunting.").await;
            }
            ChatCommand::Hunt => {
                self.apply(ModeCommand::Hunt).await;
                self.notifier.say("Hunting mode activated!").await;
            }
            ChatCommand::Attack => self.attack_nearest().await,
            ChatCommand::Come => self.come_to(sender).await,
        }
    }

    async fn attack_nearest(&mut self) {
        if self.gate.is_held() {
            self.notifier.say(BUSY_MESSAGE).await;
            return;
        }
        let Some((position, entities)) = self.observe().await else {
            return;
        };

        let ctx = TargetContext::from(self.config.as_ref());
        let area = SearchArea::around(position, self.config.engagement_radius);
        match nearest_target(&entities, &ctx, &area).cloned() {
            Some(target) => {
                self.engage(target).await;
            }
            None => self.notifier.say("No targets in range.").await,
        }
    }

    async fn come_to(&mut self, sender: &str) {
        if self.gate.is_held() {
            self.notifier.say(BUSY_MESSAGE).await;
            return;
        }
        match self.ports.world.player_position(sender).await {
            Ok(Some(at)) => {
                self.start_travel(at, self.config.come_tolerance, TravelPurpose::Come);
                self.notifier.say("Coming!").await;
            }
            Ok(None) => self.notifier.say("I can't see you.").await,
            Err(error) => warn!(%error, %sender, "Could not locate speaker"),
        }
    }

    async fn scan(&mut self, announce: bool) {
        let Some((position, entities)) = self.observe().await else {
            return;
        };

        info!("Nearby entities ({}):", entities.len());
        for entity in &entities {
            info!(
                "  - {} {} ({}) at {}, dist={:.1}",
                entity.id,
                entity.name,
                entity.category,
                entity.position.floored(),
                position.distance_to(&entity.position)
            );
        }

        if announce {
            self.notifier
                .say(&format!("I see {} entities.", entities.len()))
                .await;
        }
    }

    // ===== mode =====

    /// Carries out a mode transition in field order.
    async fn apply(&mut self, command: ModeCommand) {
        let transition = self.mode.transition(command);

        if transition.halt_combat {
            self.engaged = None;
            if let Err(error) = self.ports.combat.stop_attack().await {
                warn!(%error, "Failed to stop attacking");
            }
        }

        if transition.cancel_travel {
            self.transit = None;
            self.post_pending = false;
            // Stop aborts everything; other commands leave a running operation alone.
            if transition.halt_combat || !self.gate.is_held() {
                self.ports.movement.cancel().await;
            }
        }

        match transition.anchor {
            AnchorChange::Store(anchor) => {
                if let Err(error) = self.anchors.save(&anchor) {
                    warn!(%error, %anchor, "Failed to persist guard anchor");
                }
            }
            AnchorChange::Clear => {
                if let Err(error) = self.anchors.clear() {
                    warn!(%error, "Failed to clear guard anchor");
                }
            }
            AnchorChange::Unchanged => {}
        }

        let from = std::mem::replace(&mut self.mode, transition.mode);
        if from != self.mode {
            info!(%from, to = %self.mode, "Mode changed");
            self.event_bus.publish(AgentEvent::ModeChanged {
                from,
                to: self.mode,
            });
        }

        if let Some(post) = transition.travel_to {
            if self.gate.is_held() {
                debug!(%post, "Busy, taking post after the operation");
                self.post_pending = true;
            } else {
                self.start_travel(
                    post,
                    self.config.guard_approach_tolerance,
                    TravelPurpose::TakePost,
                );
            }
        }
    }

    /// Starts the guard trip deferred by a running operation.
    fn take_pending_post(&mut self) {
        if !std::mem::take(&mut self.post_pending) || self.transit.is_some() {
            return;
        }
        if let Some(anchor) = self.mode.anchor() {
            info!(%anchor, "Operation done, taking post");
            self.start_travel(
                anchor,
                self.config.guard_approach_tolerance,
                TravelPurpose::TakePost,
            );
        }
    }

    // ===== combat =====

    async fn decision_tick(&mut self) -> TickOutcome {
        if self.gate.is_held() {
            trace!("Tick skipped, operation in progress");
            return TickOutcome::Skipped(SkipReason::Busy);
        }
        if self.ports.combat.current_target().await.is_some() {
            return TickOutcome::Skipped(SkipReason::InCombat);
        }
        if self.engaged.is_some() {
            // The fight ended without a stop notification.
            self.combat_ended().await;
        }

        let Some((position, entities)) = self.observe().await else {
            return TickOutcome::Unavailable;
        };
        let mut ctx = DecisionContext::new(self.mode, position, entities, Arc::clone(&self.config))
            .in_transit(self.transit.is_some());

        match decide(&self.tree, &mut ctx) {
            Some(Decision::Engage(target)) => self.engage(target).await,
            Some(Decision::ReturnToAnchor(anchor)) => {
                info!(%anchor, "Returning to post");
                self.start_travel(
                    anchor,
                    self.config.guard_approach_tolerance,
                    TravelPurpose::ReturnToPost,
                );
                TickOutcome::Returning(anchor)
            }
            None => TickOutcome::Idle,
        }
    }

    async fn engage(&mut self, target: EntitySnapshot) -> TickOutcome {
        info!(
            "Found target: {} {} at {}",
            target.id,
            target.name,
            target.position.floored()
        );
        self.cancel_transit().await;

        match equip_weapon(self.ports.inventory.as_ref()).await {
            Ok(choice) => debug!(?choice, "Weapon ready"),
            Err(error) => warn!(%error, "Weapon equip failed, attacking with current hand"),
        }

        if let Err(error) = self.ports.combat.attack(target.id).await {
            warn!(%error, target = %target.id, "Attack failed");
            return TickOutcome::Idle;
        }
        info!("Attacking {}", target.name);

        self.engaged = Some(target.id);
        self.event_bus.publish(AgentEvent::Engaged {
            target: target.id,
            name: target.name,
            position: target.position,
        });
        TickOutcome::Engaged(target.id)
    }

    /// Publishes the end of an engagement and walks back to the post if needed.
    async fn combat_ended(&mut self) {
        if let Some(target) = self.engaged.take() {
            info!(%target, "Combat ended");
            self.event_bus.publish(AgentEvent::CombatEnded {
                target: Some(target),
            });
        }

        if self.transit.is_some() || self.gate.is_held() {
            return;
        }
        let position = match self.ports.world.self_position().await {
            Ok(position) => position,
            Err(error) => {
                debug!(%error, "Position unavailable after combat");
                return;
            }
        };
        if let Some(anchor) = self
            .mode
            .return_target(&position, self.config.return_threshold)
        {
            info!(%anchor, "Combat over, returning to post");
            self.start_travel(
                anchor,
                self.config.guard_approach_tolerance,
                TravelPurpose::ReturnToPost,
            );
        }
    }

    // ===== operations =====

    async fn request_operation(&mut self, kind: OperationKind, origin: Origin) {
        let refusal = if self.ports.combat.current_target().await.is_some() {
            Some(SkipReason::InCombat)
        } else {
            None
        };
        let permit = match refusal {
            Some(_) => None,
            None => self.gate.try_acquire(),
        };

        let Some(permit) = permit else {
            let reason = refusal.unwrap_or(SkipReason::Busy);
            match origin {
                Origin::Schedule => debug!(%kind, %reason, "Scheduled operation skipped"),
                Origin::Chat => {
                    info!(%kind, %reason, "Operation refused");
                    self.notifier.say(BUSY_MESSAGE).await;
                }
                Origin::Request(reply) => {
                    info!(%kind, %reason, "Operation refused");
                    let _ = reply.send(Err(OperationError::Busy));
                }
            }
            self.event_bus
                .publish(AgentEvent::OperationSkipped { kind, reason });
            return;
        };

        if matches!(origin, Origin::Schedule) {
            info!(%kind, "Scheduled operation triggered");
        }
        self.cancel_transit().await;

        let ctx = OperationContext {
            ports: self.ports.clone(),
            config: Arc::clone(&self.config),
            notifier: self.notifier.clone(),
        };
        let reply = match origin {
            Origin::Request(reply) => Some(reply),
            Origin::Chat | Origin::Schedule => None,
        };
        let tx = self.internal_tx.clone();

        tokio::spawn(async move {
            let result = {
                let _permit = permit;
                operations::run(kind, &ctx).await
            };
            if let Some(reply) = reply {
                let _ = reply.send(result.clone());
            }
            let _ = tx.send(Internal::OperationFinished { kind, result }).await;
        });
    }

    // ===== movement =====

    fn start_travel(&mut self, target: Position, tolerance: f64, purpose: TravelPurpose) {
        self.next_transit += 1;
        let transit = self.next_transit;
        self.transit = Some(Transit {
            id: transit,
            purpose,
        });

        let movement = Arc::clone(&self.ports.movement);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = movement.goto(target, tolerance).await;
            let _ = tx
                .send(Internal::TravelFinished {
                    transit,
                    purpose,
                    result,
                })
                .await;
        });
    }

    async fn cancel_transit(&mut self) {
        if self.transit.take().is_some() {
            self.ports.movement.cancel().await;
        }
    }

    async fn observe(&self) -> Option<(Position, Vec<EntitySnapshot>)> {
        let world = &self.ports.world;
        match (world.self_position().await, world.entities().await) {
            (Ok(position), Ok(entities)) => Some((position, entities)),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "World unavailable");
                None
            }
        }
    }

    fn status(&self) -> AgentStatus {
        AgentStatus {
            mode: self.mode,
            engaged: self.engaged,
            transit: self.transit.map(|t| t.purpose),
            busy: self.gate.is_held(),
        }
    }
}

/// First fire one period after start; late fires are skipped, not bunched.
fn periodic(period: Duration) -> Option<Interval> {
    if period.is_zero() {
        return None;
    }
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    Some(interval)
}

async fn next_fire(interval: &mut Option<Interval>) -> Instant {
    match interval {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}
