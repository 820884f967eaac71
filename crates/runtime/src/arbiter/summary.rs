use fleet_core::{ActionKind, Trigger};

/// What happened to one group during a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupOutcome {
    /// The mission had no ships and was aborted.
    Aborted,
    /// Nothing to fight; control went back to the mission.
    Continued,
    /// Hostiles were found but the strategy layer refused to pause.
    PauseDenied,
    /// A decision was handed to the behavior layer.
    Decided(ActionKind, Trigger),
    /// No decision and no mission change.
    Unchanged,
}

impl GroupOutcome {
    pub fn is_decided(&self) -> bool {
        matches!(self, GroupOutcome::Decided(..))
    }
}

/// Counters for one arbitration tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub decisions: usize,
    pub aborted: usize,
    pub continued: usize,
    pub pauses_granted: usize,
    pub pauses_denied: usize,
}

impl TickSummary {
    pub fn record(&mut self, outcome: GroupOutcome) {
        match outcome {
            GroupOutcome::Aborted => self.aborted += 1,
            GroupOutcome::Continued => self.continued += 1,
            GroupOutcome::PauseDenied => self.pauses_denied += 1,
            GroupOutcome::Decided(..) => self.decisions += 1,
            GroupOutcome::Unchanged => {}
        }
    }
}
