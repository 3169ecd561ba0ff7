//! Application state shared by the handlers.

pub mod state;
