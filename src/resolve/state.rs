/// Per-instance resolution state
///
/// `Nominal` offers the optimized variants; `Fallback` offers only the
/// original reference. The only transition is `Nominal -> Fallback`, on the
/// first load failure. `Fallback` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionState {
    #[default]
    Nominal,
    Fallback,
}

/// What a load-failure report did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureOutcome {
    /// Switched from the variants to the original; render again
    FellBack,
    /// The original failed too; nothing left to substitute
    Exhausted,
}

impl ResolutionState {
    pub fn is_fallback(self) -> bool {
        matches!(self, ResolutionState::Fallback)
    }

    /// Next state after a load failure, and what the failure meant
    pub(crate) fn after_load_failure(self) -> (ResolutionState, LoadFailureOutcome) {
        match self {
            ResolutionState::Nominal => (ResolutionState::Fallback, LoadFailureOutcome::FellBack),
            ResolutionState::Fallback => (ResolutionState::Fallback, LoadFailureOutcome::Exhausted),
        }
    }
}
