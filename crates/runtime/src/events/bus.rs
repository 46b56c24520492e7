//! Topic-based event bus implementation.

use std::sync::Arc;

use combat_core::StatusEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, DecisionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Status effect transitions (apply, stack change, removal)
    Status,
    /// Hits, dodges, consumption bursts, deaths
    Combat,
    /// Behavior tree outcomes
    Decision,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Status, Topic::Combat, Topic::Decision];

    const fn index(self) -> usize {
        match self {
            Topic::Status => 0,
            Topic::Combat => 1,
            Topic::Decision => 2,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Status(StatusEvent),
    Combat(CombatEvent),
    Decision(DecisionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Status(_) => Topic::Status,
            Event::Combat(_) => Topic::Combat,
            Event::Decision(_) => Topic::Decision,
        }
    }
}

/// Topic-based event bus
///
/// Allows the replication layer to subscribe to specific topics and only
/// receive events it cares about. Publishing never blocks the simulation;
/// slow subscribers lag and lose the oldest events.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 3]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Current subscriber count of `topic`.
    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.channels[topic.index()].receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::CharacterId;

    use super::*;

    #[test]
    fn events_route_to_their_topic_only() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut status = bus.subscribe(Topic::Status);

        bus.publish(Event::Combat(CombatEvent::Died { id: CharacterId(4) }));

        assert_eq!(
            combat.try_recv().unwrap(),
            Event::Combat(CombatEvent::Died { id: CharacterId(4) })
        );
        assert!(status.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Combat(CombatEvent::Died { id: CharacterId(0) }));
        assert_eq!(bus.receiver_count(Topic::Combat), 0);
    }
}
