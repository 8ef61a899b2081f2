//! Match session: one engine, its registries, the event bus and the log.
//!
//! A [`Session`] owns everything a match needs. Commands are either executed
//! directly or queued and drained in order. Accepted commands have their
//! events published, then are appended to the command log when one is
//! attached.

use std::path::Path;

use tracing::{debug, info, warn};

use chegg_core::{
    AbilityHandler, AbilityRegistrationError, AbilityRegistry, AbilityTag, AbilityTarget,
    BoardDump, Command, CommandError, GameEngine, GameEnv, GameError, InstanceId, MatchEvent,
    MatchState, PassiveAbility, Position, RegistrationError, UnitDefinition, UnitId, UnitRegistry,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, EventObserver, ObserverId};
use crate::log::{CommandLog, LogRecord, MatchLog};
use crate::queue::CommandQueue;

/// Result of one command drained from the queue.
#[derive(Debug)]
pub struct Outcome {
    pub command: Command,
    pub result: std::result::Result<Vec<MatchEvent>, CommandError>,
}

#[derive(Debug)]
pub struct Session {
    units: UnitRegistry,
    abilities: AbilityRegistry,
    state: MatchState,
    bus: EventBus,
    queue: CommandQueue,
    log: Option<CommandLog>,
}

impl Session {
    pub fn new(units: UnitRegistry, abilities: AbilityRegistry, seed: u64) -> Self {
        Self {
            units,
            abilities,
            state: MatchState::new(seed),
            bus: EventBus::new(),
            queue: CommandQueue::new(),
            log: None,
        }
    }

    /// Session seeded from `config`, logging to its command log when set.
    pub fn configured(
        units: UnitRegistry,
        abilities: AbilityRegistry,
        config: &RuntimeConfig,
    ) -> Result<Self> {
        let mut session = Self::new(units, abilities, config.seed);
        if let Some(log) = config.open_log()? {
            session.attach_log(log);
        }
        Ok(session)
    }

    /// Built-in roster and handlers.
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(UnitRegistry::new(), AbilityRegistry::new(), seed)
    }

    /// Appends every accepted command to `log` from now on.
    pub fn attach_log(&mut self, log: CommandLog) {
        self.log = Some(log);
    }

    pub fn detach_log(&mut self) -> Option<CommandLog> {
        self.log.take()
    }

    // ===== extension =====

    pub fn register_unit_definition(
        &mut self,
        definition: UnitDefinition,
    ) -> std::result::Result<(), RegistrationError> {
        let id = definition.id.clone();
        match self.units.register(definition) {
            Ok(()) => {
                info!(target: "chegg::registry", unit = %id, "unit definition registered");
                Ok(())
            }
            Err(err) => {
                warn!(
                    target: "chegg::registry",
                    unit = %id,
                    code = err.error_code(),
                    "{err}"
                );
                Err(err)
            }
        }
    }

    pub fn register_ability(
        &mut self,
        tag: AbilityTag,
        handler: Box<dyn AbilityHandler>,
    ) -> std::result::Result<(), AbilityRegistrationError> {
        self.abilities
            .register(tag.clone(), handler)
            .inspect(|_| info!(target: "chegg::registry", ability = %tag, "ability registered"))
            .inspect_err(|err| warn!(target: "chegg::registry", ability = %tag, "{err}"))
    }

    pub fn register_passive(
        &mut self,
        tag: AbilityTag,
        handler: Box<dyn PassiveAbility>,
    ) -> std::result::Result<(), AbilityRegistrationError> {
        self.abilities
            .register_passive(tag.clone(), handler)
            .inspect(|_| info!(target: "chegg::registry", ability = %tag, "passive registered"))
            .inspect_err(|err| warn!(target: "chegg::registry", ability = %tag, "{err}"))
    }

    pub fn subscribe(&mut self, observer: impl EventObserver + 'static) -> ObserverId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ===== match flow =====

    /// Shuffles and deals both decks, publishes the opening events, then
    /// writes the log header.
    pub fn start(&mut self, blue_deck: Vec<UnitId>, red_deck: Vec<UnitId>) -> Result<Vec<MatchEvent>> {
        let header = LogRecord::Start {
            seed: self.state.seed,
            blue_deck: blue_deck.clone(),
            red_deck: red_deck.clone(),
        };

        let events = self
            .engine()
            .start_match(blue_deck, red_deck)
            .map_err(|err| {
                warn!(target: "chegg::session", code = err.error_code(), "match start refused: {err}");
                RuntimeError::Start(err)
            })?;

        info!(target: "chegg::session", seed = self.state.seed, "match started");
        self.announce(&events);
        if let Some(log) = &mut self.log {
            log.append(&header)?;
        }
        Ok(events)
    }

    /// Executes one command against the match.
    ///
    /// Refusals leave the match, the log and the observers untouched. An
    /// accepted command is published to observers before it is logged, so a
    /// log write error means the match and observers have already moved on.
    pub fn execute(&mut self, command: &Command) -> Result<std::result::Result<Vec<MatchEvent>, CommandError>> {
        let nonce = self.state.turn.nonce;
        let result = self.engine().execute(command);

        match &result {
            Ok(events) => {
                debug!(
                    target: "chegg::session",
                    nonce,
                    kind = %command.kind(),
                    events = events.len(),
                    "command applied"
                );
                self.announce(events);
                if let Some(log) = &mut self.log {
                    log.append(&LogRecord::Command {
                        command: command.clone(),
                    })?;
                }
            }
            Err(err) => warn!(
                target: "chegg::session",
                nonce,
                kind = %command.kind(),
                code = err.error_code(),
                "command refused: {err}"
            ),
        }
        Ok(result)
    }

    pub fn submit(&mut self, command: Command) {
        self.queue.push(command);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drains the queue in arrival order; refused commands do not stop it.
    pub fn run_queue(&mut self) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(self.queue.len());
        while let Some(command) = self.queue.pop() {
            let result = self.execute(&command)?;
            outcomes.push(Outcome { command, result });
        }
        Ok(outcomes)
    }

    /// Rebuilds a match from a parsed log, stopping at the first refusal.
    pub fn replay(
        units: UnitRegistry,
        abilities: AbilityRegistry,
        log: &MatchLog,
    ) -> Result<Self> {
        let mut session = Self::new(units, abilities, log.seed);
        session.start(log.blue_deck.clone(), log.red_deck.clone())?;
        for (index, command) in log.commands.iter().enumerate() {
            session
                .execute(command)?
                .map_err(|source| RuntimeError::Replay { index, source })?;
        }
        info!(
            target: "chegg::session",
            commands = log.commands.len(),
            turn = session.state.turn.number,
            "replay finished"
        );
        Ok(session)
    }

    pub fn replay_file(units: UnitRegistry, abilities: AbilityRegistry, path: &Path) -> Result<Self> {
        let log = MatchLog::read(path)?;
        Self::replay(units, abilities, &log)
    }

    // ===== queries =====

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    pub fn valid_moves(&mut self, unit: InstanceId) -> Vec<Position> {
        self.engine().valid_moves(unit)
    }

    pub fn valid_attacks(&mut self, unit: InstanceId) -> Vec<Position> {
        self.engine().valid_attacks(unit)
    }

    pub fn ability_targets(&mut self, unit: InstanceId, tag: &AbilityTag) -> Vec<AbilityTarget> {
        self.engine().ability_targets(unit, tag)
    }

    pub fn can_use_ability(&mut self, unit: InstanceId, tag: &AbilityTag) -> bool {
        self.engine().can_use_ability(unit, tag)
    }

    pub fn board_dump(&self) -> String {
        BoardDump::render(&self.state, &self.units)
    }

    fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.state, GameEnv::new(&self.units, &self.abilities))
    }

    fn announce(&mut self, events: &[MatchEvent]) {
        for event in events {
            match event {
                MatchEvent::TurnStarted { side, turn, phase } => {
                    info!(target: "chegg::session", %side, turn, %phase, "turn started");
                }
                MatchEvent::GameOver { winner } => {
                    info!(target: "chegg::session", %winner, "game over");
                }
                _ => {}
            }
        }
        self.bus.publish_all(events);
    }
}
