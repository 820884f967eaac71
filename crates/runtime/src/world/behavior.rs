use fleet_core::{EngagementDecision, OwnerId};

use crate::api::BehaviorService;

/// [`BehaviorService`] that records every requested action in order.
///
/// Stands in for the behavior-selection layer; the tick driver drains it to
/// apply decisions to the combat state table.
#[derive(Clone, Debug, Default)]
pub struct DecisionLog {
    owner: Option<OwnerId>,
    decisions: Vec<EngagementDecision>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_owner(owner: OwnerId) -> Self {
        Self {
            owner: Some(owner),
            decisions: Vec::new(),
        }
    }

    pub fn decisions(&self) -> &[EngagementDecision] {
        &self.decisions
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn drain(&mut self) -> Vec<EngagementDecision> {
        std::mem::take(&mut self.decisions)
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }
}

impl BehaviorService for DecisionLog {
    fn request_action(&mut self, decision: EngagementDecision) {
        if let Some(owner) = self.owner {
            tracing::trace!("{} requests {:?} via {}", owner, decision.kind, decision.trigger);
        }
        self.decisions.push(decision);
    }
}
