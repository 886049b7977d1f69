//! Game events and subscribers
//!
//! Operations push events into an [`EventBus`] while they run; the engine
//! flushes the queue once the operation has finished mutating state, so a
//! subscriber always observes the settled game.
//!
//! Per operation the order is `MoveMade` / `AbilityUsed`, then
//! `TurnChange`, then `GameEnd`.

use crate::abilities::{AbilityOutcome, ReactiveEffect};
use crate::types::{Color, EndReason, Nation, PieceId, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    GameStart {
        white: Nation,
        black: Nation,
    },
    MoveMade {
        piece: PieceId,
        kind: PieceType,
        color: Color,
        from: Square,
        to: Square,
        captured: Option<PieceType>,
        notation: String,
        effects: Vec<ReactiveEffect>,
    },
    TurnChange {
        current: Color,
        turn_number: u32,
    },
    AbilityUsed {
        color: Color,
        outcome: AbilityOutcome,
    },
    GameEnd {
        winner: Option<Color>,
        reason: EndReason,
    },
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

type Callback = Box<dyn FnMut(&GameEvent)>;

/// Queue of undelivered events plus the registered subscribers
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
    queue: Vec<GameEvent>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("queue", &self.queue)
            .finish()
    }
}

impl EventBus {
    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// # Returns
    ///
    /// `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Queues an event for the next [`EventBus::flush`]
    pub fn emit(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Drops queued events without delivering them
    pub fn discard(&mut self) {
        self.queue.clear();
    }

    /// Delivers queued events in order to every subscriber
    pub fn flush(&mut self) {
        for event in std::mem::take(&mut self.queue) {
            for (_, callback) in self.subscribers.iter_mut() {
                callback(&event);
            }
        }
    }
}
