//! Engagement rules - reaction transitions and counter bookkeeping

mod transition;

pub use transition::{CounterDelta, ReactionResult, ReactionTransition};
