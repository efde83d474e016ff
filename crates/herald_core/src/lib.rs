//! # HERALD Core
//!
//! Typed in-process publish/subscribe event bus, driven once per scheduler
//! tick:
//! - Subscribers register per event *type*; the compiler checks payloads
//! - Publishing to a kind nobody listens to is rejected up front
//! - Dispatch is FIFO, budgeted per tick, and safe against re-entrant
//!   subscribe/unsubscribe/publish from inside callbacks
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         EventBus (bus)                       │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐  │
//! │  │ EventRegistry  │  │ SubscriberLedger│ │  EventQueue    │  │
//! │  │ kind → [cb]    │  │ owner → [(k,cb)]│ │  FIFO          │  │
//! │  └────────────────┘  └────────────────┘  └────────────────┘  │
//! │                 dispatch: budgeted drain per tick            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use herald_core::{Callback, Event, EventBus, OwnerId};
//!
//! struct GoBack;
//! impl Event for GoBack {}
//!
//! let bus = EventBus::default();
//! let on_back = Callback::new(|_: &GoBack| println!("back"));
//! bus.subscribe(&on_back, OwnerId::next());
//!
//! assert!(bus.publish(GoBack));
//! bus.dispatch(); // once per tick
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bus;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod global;
pub mod guard;
pub mod instance;
pub mod ledger;
pub mod queue;
pub mod registry;

pub use bus::EventBus;
pub use config::BusConfig;
pub use dispatch::{DispatchBudget, DispatchStats, TickReport, MAX_TICK_BUDGET};
pub use error::{BusError, BusResult};
pub use event::{Callback, CallbackId, Event, OwnerId};
pub use guard::OwnerGuard;
pub use instance::InstanceSlot;
