//! Test doubles for the card capabilities.

use std::sync::Mutex;

use prepaid_cards::{Card, CardEvent};
use prepaid_core::{DomainError, DomainResult};

use crate::create_card::{Dispatcher, Saver};

/// Dispatcher that keeps every event it is handed.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<CardEvent>>,
}

impl RecordingDispatcher {
    pub fn events(&self) -> Vec<CardEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch(&self, event: CardEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Saver that rejects every card.
#[derive(Debug, Clone)]
pub struct FailingSaver {
    reason: String,
}

impl FailingSaver {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Saver for FailingSaver {
    fn save_card(&self, _card: &Card) -> DomainResult<()> {
        Err(DomainError::persistence(self.reason.clone()))
    }
}
