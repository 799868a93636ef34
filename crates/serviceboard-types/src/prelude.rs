pub use crate::action_types::{ActionKind, ActionStatus};
pub use crate::error::{ClResult, Error};
pub use crate::types::{Patch, Timestamp};

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4
