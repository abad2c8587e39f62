use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use wsat_formula::{Assignment, Formula};

use crate::score::ScoreCard;
use crate::select::{pick_clause, pick_variable, FlipPolicy};

/// Which reading of the objective the driver minimizes and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveKind {
    /// Plain SAT: satisfied or not.
    #[default]
    Boolean,
    /// MaxSAT: number of unsatisfied clauses.
    Count,
    /// Weighted MaxSAT: total unsatisfied weight.
    WeightedSum,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectiveValue {
    Boolean(bool),
    Count(u64),
    WeightedSum(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every clause satisfied.
    Solved,
    /// Budget expired; the best assignment seen is reported. Not proof of
    /// unsatisfiability.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub seed: u64,
    pub max_time: Duration,
    /// Random-walk probability per flip.
    pub noise: f64,
    /// Probability of reinitializing the assignment instead of flipping.
    pub restart_probability: f64,
    pub objective: ObjectiveKind,
    pub flip_policy: FlipPolicy,
}

impl SearchConfig {
    pub const DEFAULT_NOISE: f64 = 0.05;

    pub fn new(seed: u64, max_time: Duration) -> Self {
        Self {
            seed,
            max_time,
            noise: Self::DEFAULT_NOISE,
            restart_probability: 0.0,
            objective: ObjectiveKind::Boolean,
            flip_policy: FlipPolicy::NetGain,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.noise) {
            return Err(anyhow!("Noise {} outside [0, 1]", self.noise));
        }
        if !(0.0..=1.0).contains(&self.restart_probability) {
            return Err(anyhow!(
                "Restart probability {} outside [0, 1]",
                self.restart_probability
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: Status,
    pub assignment: Assignment,
    pub objective: ObjectiveValue,
    pub flips: u64,
    pub restarts: u64,
}

/// Runs the search loop: random initialization, evaluate, track best,
/// deadline check, then a restart draw or a clause-and-variable flip. The
/// only exits are full satisfaction and the wall-clock budget; an expired
/// budget reports the best assignment seen, not the current one.
pub fn solve(formula: &Formula, config: &SearchConfig) -> Result<SearchOutcome> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let start = Instant::now();

    let mut assignment = Assignment::random(formula.num_variables(), &mut rng);
    let mut scores = ScoreCard::new(formula.num_variables());

    let mut best_assignment = assignment.clone();
    let mut best_cost = f64::INFINITY;
    let mut flips = 0u64;
    let mut restarts = 0u64;

    loop {
        scores.evaluate(formula, &assignment);

        if scores.is_satisfied() {
            return Ok(SearchOutcome {
                status: Status::Solved,
                assignment,
                objective: objective_from_cost(config.objective, 0.0),
                flips,
                restarts,
            });
        }

        let cost = match config.objective {
            ObjectiveKind::Boolean | ObjectiveKind::Count => scores.unsat_count() as f64,
            ObjectiveKind::WeightedSum => scores.unsat_weight(),
        };
        // Best-seen must update before the deadline check so a timeout still
        // reports the best assignment found.
        if cost < best_cost {
            best_cost = cost;
            best_assignment.clone_from(&assignment);
        }

        if start.elapsed() >= config.max_time {
            return Ok(SearchOutcome {
                status: Status::TimedOut,
                assignment: best_assignment,
                objective: objective_from_cost(config.objective, best_cost),
                flips,
                restarts,
            });
        }

        // The restart draw is only consumed when restarts are enabled, so a
        // plain configuration's draw order is unaffected by this branch.
        if config.restart_probability > 0.0 && rng.gen::<f64>() < config.restart_probability {
            assignment.randomize(&mut rng);
            restarts += 1;
            continue;
        }

        let clause = pick_clause(formula, &scores, &mut rng);
        let var = pick_variable(
            formula,
            clause,
            &scores,
            config.noise,
            config.flip_policy,
            &mut rng,
        );
        assignment.flip(var);
        flips += 1;
    }
}

fn objective_from_cost(kind: ObjectiveKind, cost: f64) -> ObjectiveValue {
    match kind {
        ObjectiveKind::Boolean => ObjectiveValue::Boolean(cost == 0.0),
        ObjectiveKind::Count => ObjectiveValue::Count(cost as u64),
        ObjectiveKind::WeightedSum => ObjectiveValue::WeightedSum(cost),
    }
}
