use anyhow::{anyhow, Result};
use ndarray::{Array2, Axis};
use rand::{
    distributions::{Distribution, Uniform},
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};

use crate::formula::{Clause, Formula};

impl Formula {
    /// Generates a uniform random k-SAT instance. Variables and negations are
    /// drawn independently per slot; `weight_range` draws one uniform weight
    /// per clause, absent means unweighted.
    pub fn random_ksat(
        seed: u64,
        num_variables: usize,
        num_clauses: usize,
        clause_size: usize,
        weight_range: Option<(f64, f64)>,
    ) -> Result<Self> {
        if num_variables == 0 || num_variables > i32::MAX as usize {
            return Err(anyhow!("Invalid number of variables: {}", num_variables));
        }
        if clause_size == 0 {
            return Err(anyhow!("Clause size must be positive"));
        }
        let mut rng = SmallRng::from_seed(StdRng::seed_from_u64(seed).gen());

        let var_distr = Uniform::new(1, num_variables as i32 + 1);
        let neg_distr = Uniform::new(0, 2);

        let clauses_array =
            Array2::from_shape_fn((num_clauses, clause_size), |_| var_distr.sample(&mut rng));
        let negations = Array2::from_shape_fn((num_clauses, clause_size), |_| {
            if neg_distr.sample(&mut rng) == 0 {
                -1
            } else {
                1
            }
        });
        let clauses_array = clauses_array * negations;

        let weights: Vec<f64> = match weight_range {
            Some((lo, hi)) => {
                if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || hi < lo {
                    return Err(anyhow!("Invalid weight range: {}..{}", lo, hi));
                }
                let weight_distr = Uniform::new_inclusive(lo, hi);
                (0..num_clauses).map(|_| weight_distr.sample(&mut rng)).collect()
            }
            None => vec![1.0; num_clauses],
        };

        let clauses = clauses_array
            .axis_iter(Axis(0))
            .zip(weights)
            .map(|(row, weight)| Clause::weighted(row.to_vec(), weight))
            .collect();

        Self::new(num_variables, clauses)
    }
}
