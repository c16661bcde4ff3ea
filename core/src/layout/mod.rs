//! Layout persistence: the serialized layout format and its bridge.
//!
//! `record` defines one entry of the interchange format. `bridge` parses
//! host-supplied text into records ready for the engine and encodes engine
//! snapshots back into text.

pub mod bridge;
pub mod record;
