//! View-state layer for the events dashboard.
//!
//! One explicit state object ([`EventsView`]) replaces the pile of
//! per-modal open/closed flags: a tagged [`ActiveDialog`] (at most one
//! dialog open at a time), a focused-record reference, per-kind source
//! slots that load and fail independently, and the filter + selection
//! wiring with its invariants.
//!
//! [`flows`] contains the user-action orchestrations (load, save, delete,
//! merge, generate) that tie the view state to the REST client and the
//! document generator, emitting exactly one terminal notification per
//! mutation.

pub mod flows;
pub mod seed;
pub mod state;
pub mod telemetry;

pub use state::{ActiveDialog, EventsView, SourceState};
pub use telemetry::init_tracing;
