mod driver;
mod score;
mod select;

pub use driver::{
    solve, ObjectiveKind, ObjectiveValue, SearchConfig, SearchOutcome, Status,
};
pub use score::ScoreCard;
pub use select::{pick_clause, pick_variable, FlipPolicy};
