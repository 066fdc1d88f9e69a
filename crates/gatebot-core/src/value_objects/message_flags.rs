//! Message flags bitflags

use bitflags::bitflags;
use serde::{Serialize, Serializer};

bitflags! {
    /// Flags carried on outbound interaction responses
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u64 {
        /// Do not render link embeds
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Only visible to the user who invoked the interaction
        const EPHEMERAL       = 1 << 6;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}
