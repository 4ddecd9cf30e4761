//! Questionnaire domain module.
//!
//! One parameterized selection/ranking flow shared by every questionnaire
//! screen: pick up to N options, optionally rank the picks, emit the ranked
//! result. Screens differ only in their [`ScreenSelectionConfig`].

pub mod config;
pub mod flow;
pub mod ranking;
pub mod selection;

pub use config::{ConfirmGate, OverflowPolicy, ScreenSelectionConfig};
pub use flow::{AnswerFlow, AnswerFlowError, AnswerPhase};
pub use ranking::{AnswerId, OrderedAnswer, RankedList, RankingError};
pub use selection::{SelectionChange, SelectionError, SelectionState};
