//! Shared library modules providing error types, telemetry initialization, and the process guard.

pub mod errors;
pub mod guard;
pub mod telemetry;
