//! Status returned by decision nodes.

/// The result of evaluating a decision node for one tick.
///
/// # Tick Semantics
///
/// Every tick is a fresh evaluation from the root. Nothing is cached between
/// ticks except the private state a [`Task`](crate::Task) keeps for itself,
/// which is how multi-tick actions report `Running` and resume next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The node completed successfully.
    ///
    /// For checkers: the condition held.
    /// For tasks: the action completed this tick.
    Success,

    /// The node failed.
    ///
    /// For checkers: the condition did not hold.
    /// For tasks: the action's precondition silently failed.
    Failure,

    /// A task is still in progress and will be re-entered next tick.
    ///
    /// Checkers never produce this value.
    Running,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Maps a checker's boolean answer onto a status.
    #[inline]
    pub fn from_check(passed: bool) -> Self {
        if passed {
            Status::Success
        } else {
            Status::Failure
        }
    }

    /// Short label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Running => "running",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_check_maps_booleans() {
        assert_eq!(Status::from_check(true), Status::Success);
        assert_eq!(Status::from_check(false), Status::Failure);
    }

    #[test]
    fn predicates_are_exclusive() {
        for status in [Status::Success, Status::Failure, Status::Running] {
            let hits = [status.is_success(), status.is_failure(), status.is_running()]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(hits, 1, "{status:?}");
        }
    }
}
