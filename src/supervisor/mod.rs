// src/supervisor/mod.rs

pub mod child;
pub mod events;
pub mod runtime;
pub mod state;

pub use events::{ShutdownSignal, SupervisorEvent};
pub use runtime::{GRACE_PERIOD, Supervisor, spawn_grace_timer};
pub use state::SharedStatus;
