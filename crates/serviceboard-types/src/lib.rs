//! Shared types, collaborator traits, and core utilities for the service board.
//!
//! This crate contains the foundational types that are shared between the
//! action framework and every Board Action Store implementation. Keeping them
//! here lets store adapters compile without pulling in the transform and
//! state machine code.

pub mod action_types;
pub mod board_store;
pub mod calendar;
pub mod error;
pub mod event;
pub mod merge;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
