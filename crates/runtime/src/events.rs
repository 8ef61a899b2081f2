//! Topic-based, synchronous event bus.
//!
//! The session publishes every [`MatchEvent`] it receives from the engine.
//! Observers subscribe to topics and are called in registration order,
//! on the caller's thread, before the command returns.

use chegg_core::MatchEvent;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Topic {
    /// Turn boundaries and the match result.
    Turn,
    /// Units appearing, moving, fighting and dying.
    Board,
    /// Draws, steals and discards.
    Cards,
    /// Spending and bonus changes.
    Mana,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Turn, Topic::Board, Topic::Cards, Topic::Mana];

    pub fn of(event: &MatchEvent) -> Self {
        match event {
            MatchEvent::TurnStarted { .. }
            | MatchEvent::TurnEnded { .. }
            | MatchEvent::GameOver { .. } => Topic::Turn,
            MatchEvent::UnitSpawned { .. }
            | MatchEvent::UnitMoved { .. }
            | MatchEvent::UnitRelocated { .. }
            | MatchEvent::UnitAttacked { .. }
            | MatchEvent::AbilityUsed { .. }
            | MatchEvent::UnitDestroyed { .. } => Topic::Board,
            MatchEvent::CardsDrawn { .. }
            | MatchEvent::CardsTaken { .. }
            | MatchEvent::CardsDiscarded { .. } => Topic::Cards,
            MatchEvent::ManaSpent { .. } | MatchEvent::BonusManaChanged { .. } => Topic::Mana,
        }
    }
}

/// Receiver of published match events.
pub trait EventObserver {
    /// Returns a human-readable name for this observer (used in logging).
    fn name(&self) -> &'static str;

    /// Topics this observer wants; every topic by default.
    fn topics(&self) -> &[Topic] {
        &Topic::ALL
    }

    fn on_event(&mut self, event: &MatchEvent);
}

/// Observer handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

pub struct EventBus {
    observers: Vec<(ObserverId, Box<dyn EventObserver>)>,
    next_id: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl EventObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        tracing::debug!(target: "chegg::events", observer = observer.name(), "observer subscribed");
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the observer was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Delivers `event` to every observer subscribed to its topic.
    pub fn publish(&mut self, event: &MatchEvent) {
        let topic = Topic::of(event);
        for (_, observer) in &mut self.observers {
            if observer.topics().contains(&topic) {
                observer.on_event(event);
            }
        }
    }

    pub fn publish_all(&mut self, events: &[MatchEvent]) {
        for event in events {
            self.publish(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field(
                "observers",
                &self
                    .observers
                    .iter()
                    .map(|(_, observer)| observer.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Writes every event to the `chegg::events` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl EventObserver for TracingObserver {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_event(&mut self, event: &MatchEvent) {
        tracing::trace!(target: "chegg::events", ?event, "match event");
    }
}

/// Keeps a shared copy of the events it observes.
///
/// Clones share one buffer, so a caller can keep one clone and subscribe
/// the other.
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    topics: Option<Vec<Topic>>,
    events: std::rc::Rc<std::cell::RefCell<Vec<MatchEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_topics(topics: &[Topic]) -> Self {
        Self {
            topics: Some(topics.to_vec()),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<MatchEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<MatchEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventObserver for EventRecorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn topics(&self) -> &[Topic] {
        self.topics.as_deref().unwrap_or(&Topic::ALL)
    }

    fn on_event(&mut self, event: &MatchEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
