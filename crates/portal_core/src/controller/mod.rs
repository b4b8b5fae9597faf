//! Controller layer: visitor commands, login outcomes, and the session flows.

pub mod events;
pub mod session;
