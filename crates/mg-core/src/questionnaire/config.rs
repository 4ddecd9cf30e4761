//! Selection policy configuration.

use serde::{Deserialize, Serialize};

/// What happens when a pick would exceed the selection cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Refuse the new pick; the screen surfaces a limit notice.
    RejectNew,
    /// Drop the oldest pick and accept the new one.
    EvictOldest,
}

/// Gate applied when leaving the selecting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmGate {
    /// Any non-empty selection may proceed.
    AtLeastOne,
    /// Exactly this many picks are required to proceed. Rejects the
    /// transition, never the individual toggle.
    Exactly(usize),
}

/// Per-screen selection policy.
///
/// Every questionnaire screen instantiates the same flow with one of these;
/// the policy differences between screens live here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSelectionConfig {
    /// Selection ceiling; never less than 1.
    pub max_selections: usize,
    pub overflow: OverflowPolicy,
    pub confirm_gate: ConfirmGate,
}

impl ScreenSelectionConfig {
    /// Hard cap with a rejection notice. The default policy for multi-pick
    /// questionnaire screens.
    pub fn capped(max_selections: usize) -> Self {
        Self {
            max_selections: max_selections.max(1),
            overflow: OverflowPolicy::RejectNew,
            confirm_gate: ConfirmGate::AtLeastOne,
        }
    }

    /// Pick-and-rank policy: exactly `count` picks must be made before
    /// ordering begins, and the cap equals that count.
    pub fn ranked(count: usize) -> Self {
        let count = count.max(1);
        Self {
            max_selections: count,
            overflow: OverflowPolicy::RejectNew,
            confirm_gate: ConfirmGate::Exactly(count),
        }
    }

    /// Opt in to evict-oldest overflow instead of rejection.
    pub fn with_eviction(mut self) -> Self {
        self.overflow = OverflowPolicy::EvictOldest;
        self
    }

    /// Interests picker on the welcome questionnaire: up to 7 picks.
    pub fn welcome_questionnaire() -> Self {
        Self::capped(7)
    }

    /// The order-answers ranking step: pick and rank exactly 3.
    pub fn order_answers() -> Self {
        Self::ranked(3)
    }
}

impl Default for ScreenSelectionConfig {
    fn default() -> Self {
        Self::capped(3)
    }
}
