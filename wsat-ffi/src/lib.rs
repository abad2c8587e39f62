use std::panic::catch_unwind;
use std::slice;
use std::time::Duration;

use wsat_engine::{solve, ObjectiveKind, SearchConfig, Status};
use wsat_formula::Formula;

pub const WSAT_SOLVED: i32 = 1;
pub const WSAT_TIMED_OUT: i32 = 0;
pub const WSAT_MALFORMED_INPUT: i32 = -1;
pub const WSAT_PANIC: i32 = -2;

/// C entry point for the search engine.
///
/// `formula` is the flattened encoding: clauses concatenated in order, each
/// terminated by a 0 literal; its length is implied by `num_clauses`
/// terminators. `weights` is either null (unweighted, objective = unsatisfied
/// clause count) or `num_clauses` non-negative weights (objective = total
/// unsatisfied weight). `assignment_out` must hold `num_variables + 1`
/// entries; slot 0 is written as 0, slots 1..=N as -1 or +1. `objective_out`
/// may be null.
///
/// Returns `WSAT_SOLVED`, `WSAT_TIMED_OUT` (best-effort assignment and
/// objective written), `WSAT_MALFORMED_INPUT`, or `WSAT_PANIC` (output
/// buffers untouched).
///
/// # Safety
///
/// `formula` must stay readable for `num_clauses` zero-terminators,
/// `weights` for `num_clauses` entries when non-null, and `assignment_out`
/// must be writable for `num_variables + 1` entries.
#[no_mangle]
pub unsafe extern "C" fn wsat_solve(
    seed: u64,
    max_time_s: u64,
    noise: f64,
    num_variables: u64,
    num_clauses: u64,
    formula: *const i64,
    weights: *const f64,
    assignment_out: *mut i8,
    objective_out: *mut f64,
) -> i32 {
    catch_unwind(|| unsafe {
        solve_inner(
            seed,
            max_time_s,
            noise,
            num_variables,
            num_clauses,
            formula,
            weights,
            assignment_out,
            objective_out,
        )
    })
    .unwrap_or(WSAT_PANIC)
}

unsafe fn solve_inner(
    seed: u64,
    max_time_s: u64,
    noise: f64,
    num_variables: u64,
    num_clauses: u64,
    formula: *const i64,
    weights: *const f64,
    assignment_out: *mut i8,
    objective_out: *mut f64,
) -> i32 {
    let num_variables = num_variables as usize;
    let num_clauses = num_clauses as usize;

    if assignment_out.is_null() || (formula.is_null() && num_clauses > 0) {
        return WSAT_MALFORMED_INPUT;
    }

    let stream = read_stream(formula, num_clauses);
    let weights = if weights.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(weights, num_clauses))
    };

    let formula = match Formula::from_flat(num_variables, num_clauses, &stream, weights) {
        Ok(formula) => formula,
        Err(_) => return WSAT_MALFORMED_INPUT,
    };

    let mut config = SearchConfig::new(seed, Duration::from_secs(max_time_s));
    config.noise = noise;
    config.objective = if weights.is_some() {
        ObjectiveKind::WeightedSum
    } else {
        ObjectiveKind::Count
    };

    let outcome = match solve(&formula, &config) {
        Ok(outcome) => outcome,
        Err(_) => return WSAT_MALFORMED_INPUT,
    };

    let out = slice::from_raw_parts_mut(assignment_out, num_variables + 1);
    out[0] = 0;
    out[1..].copy_from_slice(outcome.assignment.polarities());
    if !objective_out.is_null() {
        *objective_out = match outcome.objective {
            wsat_engine::ObjectiveValue::Boolean(solved) => {
                if solved {
                    0.0
                } else {
                    1.0
                }
            }
            wsat_engine::ObjectiveValue::Count(count) => count as f64,
            wsat_engine::ObjectiveValue::WeightedSum(weight) => weight,
        };
    }

    match outcome.status {
        Status::Solved => WSAT_SOLVED,
        Status::TimedOut => WSAT_TIMED_OUT,
    }
}

// Walks the stream until `num_clauses` terminators have been consumed; the
// wire contract carries no explicit length.
unsafe fn read_stream(formula: *const i64, num_clauses: usize) -> Vec<i64> {
    let mut stream = Vec::new();
    let mut ptr = formula;
    let mut terminators = 0;
    while terminators < num_clauses {
        let value = ptr.read();
        stream.push(value);
        if value == 0 {
            terminators += 1;
        }
        ptr = ptr.add(1);
    }
    stream
}
