// Identifier types for the relay protocol.
//
// `RelayPlayerId` is the relay's own compact id space — assigned per
// accepted connection, 0-based and monotonically increasing, never reused.
// It is deliberately distinct from the game core's seat index type: the
// protocol crate has no dependency on `punto_core`, and clients map relay
// ids onto seats themselves.

use serde::{Deserialize, Serialize};

/// Relay-assigned player ID (compact u32).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelayPlayerId(pub u32);
