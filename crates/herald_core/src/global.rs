//! # Process-Wide Bus
//!
//! The one event bus of a running process. The host calls [`init`] once at
//! startup and [`shutdown`] once at teardown; everything in between reaches
//! the bus through [`instance`], which fails loudly outside that window.

use std::sync::Arc;

use crate::bus::EventBus;
use crate::config::BusConfig;
use crate::error::BusResult;
use crate::instance::InstanceSlot;

static BUS: InstanceSlot<EventBus> = InstanceSlot::new("event bus");

/// Creates the process-wide bus.
///
/// # Errors
///
/// Returns [`BusError::AlreadyInitialized`](crate::BusError::AlreadyInitialized)
/// if a bus is live, or [`BusError::InvalidConfig`](crate::BusError::InvalidConfig)
/// for a bad budget.
pub fn init(config: &BusConfig) -> BusResult<Arc<EventBus>> {
    let bus = EventBus::from_config(config)?;
    let bus = BUS.init(bus)?;
    tracing::info!(budget = ?bus.budget(), "event bus initialized");
    Ok(bus)
}

/// Returns the process-wide bus.
///
/// # Errors
///
/// Returns [`BusError::NotInitialized`](crate::BusError::NotInitialized)
/// before [`init`] or after [`shutdown`].
pub fn instance() -> BusResult<Arc<EventBus>> {
    BUS.get()
}

/// Returns `true` while a process-wide bus is live.
#[must_use]
pub fn is_initialized() -> bool {
    BUS.is_initialized()
}

/// Shuts the process-wide bus down and empties the slot.
///
/// Handles held elsewhere stay valid but reject every publish.
/// Returns `false` if no bus was live.
pub fn shutdown() -> bool {
    match BUS.take() {
        Some(bus) => {
            bus.shutdown();
            true
        }
        None => false,
    }
}
