pub use serviceboard_types::prelude::*;

// vim: ts=4
