// engine/src/engine/reward.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Reward-collection payload: the credits and gamecoins one turn earned.
///
/// Field names are the wire contract with the wallet service.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RewardEvent {
    pub credits: u32,
    pub gamecoins: u32,
}

/// Receives reward events. Fire-and-forget: the engine never observes whether a collection
/// succeeded and never rolls a turn back.
///
/// Object-safe so it can be passed as `&mut dyn RewardCollector`.
pub trait RewardCollector {
    fn collect(&mut self, event: RewardEvent);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCollector;

impl RewardCollector for NoopCollector {
    fn collect(&mut self, _event: RewardEvent) {}
}

/// Keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingCollector {
    pub events: Vec<RewardEvent>,
}

impl RewardCollector for RecordingCollector {
    fn collect(&mut self, event: RewardEvent) {
        self.events.push(event);
    }
}

/// In-memory balance; each event is added to the running totals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Wallet {
    pub credits: u64,
    pub gamecoins: u64,
    pub collections: u64,
}

impl RewardCollector for Wallet {
    fn collect(&mut self, event: RewardEvent) {
        self.credits += u64::from(event.credits);
        self.gamecoins += u64::from(event.gamecoins);
        self.collections += 1;
    }
}

impl<C: RewardCollector + ?Sized> RewardCollector for &mut C {
    fn collect(&mut self, event: RewardEvent) {
        (**self).collect(event);
    }
}
