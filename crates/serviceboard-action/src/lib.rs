//! Action framework for service boards.
//!
//! Actions are typed cards (payment requests, appointments, checklists, ...)
//! attached to a board. Raw form input goes through the transform pipeline into
//! a canonical payload, the validation pipeline decides whether that payload may
//! be persisted, and customer or business interactions move it along through
//! transition functions. The [`service::BoardActionService`] ties these pure
//! pieces to a Board Action Store, a calendar, and a notification sink.

pub mod appointment;
pub mod details;
pub mod events;
pub mod registry;
pub mod respond;
pub mod service;
pub mod settings;
pub mod transform;
pub mod validate;

mod prelude;

pub use details::ActionDetails;
pub use serviceboard_types::merge;
pub use serviceboard_types::action_types::{ActionKind, ActionStatus};
pub use settings::{ActionSettings, TransformCtx};

// vim: ts=4
