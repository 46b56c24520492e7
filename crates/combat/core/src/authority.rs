//! Simulation authority.
//!
//! Exactly one simulation owner per match mutates combat state. Every other
//! copy is a replica that only receives snapshots. Mutating entry points on a
//! replica are no-ops: they return a neutral value and log at trace level.

/// Who is allowed to mutate the state this value guards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Authority {
    /// The single simulation owner.
    #[default]
    Authoritative,
    /// A read-only projection fed by replication.
    Replica,
}

impl Authority {
    #[inline]
    pub const fn is_authoritative(self) -> bool {
        matches!(self, Authority::Authoritative)
    }

    #[inline]
    pub const fn is_replica(self) -> bool {
        matches!(self, Authority::Replica)
    }

    /// Returns true when a mutation may proceed; otherwise traces the skip.
    #[inline]
    pub(crate) fn permits(self, operation: &'static str) -> bool {
        if self.is_replica() {
            tracing::trace!(target: "combat::authority", operation, "ignored on replica");
            return false;
        }
        true
    }
}
