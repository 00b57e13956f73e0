//! Background tasks module
//!
//! The clock, the local tick loop, the periodic refresh loop, the state
//! observer, and the session that owns them.

pub mod auto_refresh;
pub mod clock;
pub mod countdown_tick;
pub mod session;
pub mod state_observer;

// Re-export main items
pub use auto_refresh::auto_refresh_task;
pub use clock::Clock;
pub use countdown_tick::countdown_tick_task;
pub use session::{CountdownSession, SessionConfig};
pub use state_observer::{state_events, state_observer_task, StateEvent};
