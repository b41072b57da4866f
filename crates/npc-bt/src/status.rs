/// Outcome of ticking a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    Success,
    Failure,
    Running,
    /// Never ticked since construction or the last [`reset`](crate::BehaviorTree::reset).
    #[default]
    Inactive,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, Status::Success | Status::Failure)
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::Failure => "FAILURE",
            Status::Running => "RUNNING",
            Status::Inactive => "INACTIVE",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
