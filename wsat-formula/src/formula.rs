use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;

/// A disjunction of non-zero literals with a non-negative weight.
/// Literal order is preserved; it drives tie-breaking in the selector.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Clause {
    literals: Vec<i32>,
    weight: f64,
}

impl Clause {
    pub fn new(literals: Vec<i32>) -> Self {
        Self {
            literals,
            weight: 1.0,
        }
    }

    pub fn weighted(literals: Vec<i32>, weight: f64) -> Self {
        Self { literals, weight }
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// A CNF formula over variables 1..=num_variables. Immutable once constructed:
/// every constructor validates, and access is read-only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_variables: usize, clauses: Vec<Clause>) -> Result<Self> {
        if num_variables > i32::MAX as usize {
            return Err(anyhow!(
                "Number of variables {} exceeds the literal range",
                num_variables
            ));
        }
        for (c, clause) in clauses.iter().enumerate() {
            if clause.literals.is_empty() {
                return Err(anyhow!("Clause {} is empty", c));
            }
            if !clause.weight.is_finite() || clause.weight < 0.0 {
                return Err(anyhow!(
                    "Clause {} has invalid weight {}",
                    c,
                    clause.weight
                ));
            }
            for &literal in &clause.literals {
                if literal == 0 {
                    return Err(anyhow!("Clause {} contains literal 0", c));
                }
                let var = literal.unsigned_abs() as usize;
                if var > num_variables {
                    return Err(anyhow!(
                        "Clause {} references variable {}. Expected range: 1..={}",
                        c,
                        var,
                        num_variables
                    ));
                }
            }
        }
        Ok(Self {
            num_variables,
            clauses,
        })
    }

    /// Decodes the flattened wire encoding: clauses concatenated in order,
    /// each terminated by a 0 literal. `weights` must have one entry per
    /// clause when present; absent means every clause weighs 1.
    pub fn from_flat(
        num_variables: usize,
        num_clauses: usize,
        stream: &[i64],
        weights: Option<&[f64]>,
    ) -> Result<Self> {
        if let Some(weights) = weights {
            if weights.len() != num_clauses {
                return Err(anyhow!(
                    "Invalid number of clause weights. Expected: {}, Actual: {}",
                    num_clauses,
                    weights.len()
                ));
            }
        }
        let mut values = stream.iter();
        let mut clauses = Vec::with_capacity(num_clauses);
        for c in 0..num_clauses {
            let mut literals = Vec::new();
            loop {
                let raw = match values.next() {
                    Some(&raw) => raw,
                    None => {
                        return Err(anyhow!(
                            "Literal stream ended inside clause {} ({} clauses declared)",
                            c,
                            num_clauses
                        ))
                    }
                };
                if raw == 0 {
                    break;
                }
                let literal = i32::try_from(raw)
                    .map_err(|_| anyhow!("Clause {} literal {} out of range", c, raw))?;
                literals.push(literal);
            }
            let weight = weights.map_or(1.0, |w| w[c]);
            clauses.push(Clause::weighted(literals, weight));
        }
        if values.next().is_some() {
            return Err(anyhow!(
                "Literal stream continues after {} declared clauses",
                num_clauses
            ));
        }
        Self::new(num_variables, clauses)
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause(&self, idx: usize) -> &Clause {
        &self.clauses[idx]
    }

    /// True if any clause carries a weight other than 1.
    pub fn is_weighted(&self) -> bool {
        self.clauses.iter().any(|c| c.weight != 1.0)
    }

    /// Index of the first clause falsified by `assignment`, if any.
    pub fn first_unsatisfied(&self, assignment: &Assignment) -> Option<usize> {
        self.clauses
            .iter()
            .position(|clause| !clause.literals.iter().any(|&l| assignment.satisfies(l)))
    }

    pub fn unsatisfied_count(&self, assignment: &Assignment) -> usize {
        self.clauses
            .iter()
            .filter(|clause| !clause.literals.iter().any(|&l| assignment.satisfies(l)))
            .count()
    }

    pub fn unsatisfied_weight(&self, assignment: &Assignment) -> f64 {
        self.clauses
            .iter()
            .filter(|clause| !clause.literals.iter().any(|&l| assignment.satisfies(l)))
            .map(|clause| clause.weight)
            .sum()
    }

    /// Independent full check of an assignment against every clause.
    pub fn verify_assignment(&self, assignment: &Assignment) -> Result<()> {
        if assignment.num_variables() != self.num_variables {
            return Err(anyhow!(
                "Invalid number of variables. Expected: {}, Actual: {}",
                self.num_variables,
                assignment.num_variables()
            ));
        }
        match self.first_unsatisfied(assignment) {
            Some(c) => Err(anyhow!("Clause '{}' not satisfied", c)),
            None => Ok(()),
        }
    }
}
