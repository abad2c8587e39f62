use rand::Rng;
use wsat_formula::Formula;

use crate::score::ScoreCard;

/// Greedy rule applied when the random-walk branch is not taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipPolicy {
    /// Maximize `gain - loss`.
    #[default]
    NetGain,
    /// Minimize `loss` alone.
    MinBreak,
}

/// Draws one falsified clause, weighted by clause weight. Uniform weights
/// degenerate to a uniform choice.
pub fn pick_clause<R: Rng>(formula: &Formula, scores: &ScoreCard, rng: &mut R) -> usize {
    let unsat = scores.unsat();
    assert!(!unsat.is_empty(), "clause selection on a satisfied formula");

    let total: f64 = unsat.iter().map(|&c| formula.clause(c).weight()).sum();
    if total <= 0.0 {
        // every candidate has weight 0, weighted sampling is undefined
        return unsat[rng.gen_range(0..unsat.len())];
    }
    let draw = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    for &c in unsat {
        acc += formula.clause(c).weight();
        if acc > draw {
            return c;
        }
    }
    // float accumulation undershot the total
    *unsat.last().unwrap()
}

/// Picks the variable to flip within `clause_idx`: a uniform draw over the
/// clause's literals with probability `noise`, otherwise the greedy scan for
/// the configured policy. Ties break to the first literal in clause order.
pub fn pick_variable<R: Rng>(
    formula: &Formula,
    clause_idx: usize,
    scores: &ScoreCard,
    noise: f64,
    policy: FlipPolicy,
    rng: &mut R,
) -> usize {
    let literals = formula.clause(clause_idx).literals();
    assert!(
        !literals.is_empty(),
        "empty clause {} reached the selector",
        clause_idx
    );

    if rng.gen::<f64>() < noise {
        return literals[rng.gen_range(0..literals.len())].unsigned_abs() as usize;
    }

    let mut best_var = 0usize;
    let mut best_score = f64::NEG_INFINITY;
    for &literal in literals {
        let var = literal.unsigned_abs() as usize;
        let score = match policy {
            FlipPolicy::NetGain => scores.gain(var) - scores.loss(var),
            FlipPolicy::MinBreak => -scores.loss(var),
        };
        if score > best_score {
            best_score = score;
            best_var = var;
        }
    }
    assert!(
        best_var != 0,
        "no flip candidate in clause {}",
        clause_idx
    );
    best_var
}
