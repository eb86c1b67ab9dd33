use chrono::{DateTime, Utc};

use prepaid_core::EventId;

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - **identified** (every occurrence has its own id)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Unique id of this occurrence.
    fn event_id(&self) -> EventId;

    /// Stable event name/type identifier (e.g. "card.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
