//! cooler-app - Application state and orchestration for the unit cooler dashboard
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management:
//! background tasks (pollers, the push listener, the 1 Hz clock, request tasks)
//! send [`Message`]s, [`handler::update`] turns them into state changes plus
//! [`UpdateAction`]s, and the [`Engine`] ties it all together for the TUI and
//! headless runners.

pub mod actions;
pub mod animated;
pub mod config;
pub mod cooling;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod listener;
pub mod message;
pub mod pager;
pub mod poller;
pub mod process;
pub mod resource;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use listener::ListenerState;
pub use message::{Message, Payload};
pub use resource::{Resource, ResourceKind};
pub use state::AppState;
