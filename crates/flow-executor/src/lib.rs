//! Action Executor Boundary
//!
//! The engine's single external capability: given one action, perform it
//! against a live target and report success or a typed failure. The real
//! implementation is a browser-automation backend and lives outside this
//! repository; [`SimulatedExecutor`] is a deterministic stand-in for dry
//! runs and test doubles.

pub mod errors;
pub mod executor;
pub mod simulated;
pub mod types;

pub use errors::ExecError;
pub use executor::{ActionExecutor, CURRENT_LOCATION};
pub use simulated::SimulatedExecutor;
pub use types::ExecCtx;
