//! Async host loop around the combat rules.
//!
//! `combat-core` resolves every action synchronously. This crate owns the
//! battle state behind a [`TurnRunner`] that applies each logical step and
//! only then awaits a [`Presenter`], so animation timing never feeds back into
//! the numbers.
//!
//! Modules:
//! - [`config`]: environment-driven runtime settings
//! - [`events`]: topic-based broadcast of turn progress
//! - [`oracle`]: owned read-only collaborators for [`combat_core::CombatEnv`]
//! - [`presenter`]: the presentation seam awaited between steps
//! - [`runner`]: the re-entrancy-guarded turn loop
pub mod config;
pub mod error;
pub mod events;
pub mod oracle;
pub mod presenter;
pub mod runner;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{ActionEvent, Event, EventBus, Topic, TurnEvent};
pub use oracle::OracleBundle;
pub use presenter::{DelayPresenter, NullPresenter, PresentationStep, Presenter};
pub use runner::{TurnRunner, TurnRunnerBuilder};
