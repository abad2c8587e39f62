use anyhow::{anyhow, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};

/// Signed polarity assignment over variables 1..=N. Slot 0 is a reserved
/// sentinel and stays 0; every other slot holds -1 or +1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<i8>,
}

impl Assignment {
    pub fn random<R: Rng>(num_variables: usize, rng: &mut R) -> Self {
        let mut assignment = Self {
            values: vec![0; num_variables + 1],
        };
        assignment.randomize(rng);
        assignment
    }

    /// Re-draws every variable's polarity in place, one draw per variable.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for value in self.values.iter_mut().skip(1) {
            *value = if rng.gen_bool(0.5) { 1 } else { -1 };
        }
    }

    /// Builds an assignment from per-variable polarities (entry 0 is
    /// variable 1). Entries must be -1 or +1.
    pub fn from_polarities(polarities: &[i8]) -> Result<Self> {
        let mut values = Vec::with_capacity(polarities.len() + 1);
        values.push(0);
        for (i, &polarity) in polarities.iter().enumerate() {
            if polarity != -1 && polarity != 1 {
                return Err(anyhow!(
                    "Variable {} has polarity {}. Expected -1 or 1",
                    i + 1,
                    polarity
                ));
            }
            values.push(polarity);
        }
        Ok(Self { values })
    }

    pub fn num_variables(&self) -> usize {
        self.values.len() - 1
    }

    pub fn value(&self, var: usize) -> i8 {
        self.values[var]
    }

    pub fn flip(&mut self, var: usize) {
        self.values[var] = -self.values[var];
    }

    /// A literal is satisfied when its sign agrees with the stored polarity.
    pub fn satisfies(&self, literal: i32) -> bool {
        literal.signum() as i8 * self.values[literal.unsigned_abs() as usize] > 0
    }

    /// Polarities of variables 1..=N, without the sentinel slot.
    pub fn polarities(&self) -> &[i8] {
        &self.values[1..]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Solution {
    pub polarities: Vec<i8>,
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

impl From<&Assignment> for Solution {
    fn from(assignment: &Assignment) -> Self {
        Self {
            polarities: assignment.polarities().to_vec(),
        }
    }
}

impl TryFrom<&Solution> for Assignment {
    type Error = anyhow::Error;

    fn try_from(solution: &Solution) -> Result<Self> {
        Assignment::from_polarities(&solution.polarities)
    }
}
