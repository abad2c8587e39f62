use anyhow::{anyhow, Result};
use std::fmt::Write;

use crate::formula::{Clause, Formula};

struct Header {
    weighted: bool,
    num_variables: usize,
    num_clauses: usize,
}

impl Formula {
    /// Parses DIMACS `cnf` and weighted `wcnf` text. Comment lines, clauses
    /// split across lines, and a trailing unterminated clause are all
    /// accepted; in `wcnf` the first token of each clause is its weight.
    pub fn from_dimacs(text: &str) -> Result<Self> {
        let mut header: Option<Header> = None;
        let mut clauses: Vec<Clause> = Vec::new();
        let mut literals: Vec<i32> = Vec::new();
        let mut weight: Option<f64> = None;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if line.starts_with('p') {
                if header.is_some() {
                    return Err(anyhow!("Line {}: duplicate problem line", line_no + 1));
                }
                header = Some(parse_problem_line(line, line_no)?);
                continue;
            }
            let header = header
                .as_ref()
                .ok_or_else(|| anyhow!("Line {}: clause before problem line", line_no + 1))?;
            for token in line.split_whitespace() {
                if header.weighted && weight.is_none() && literals.is_empty() {
                    let w: f64 = token.parse().map_err(|_| {
                        anyhow!("Line {}: invalid clause weight '{}'", line_no + 1, token)
                    })?;
                    weight = Some(w);
                    continue;
                }
                let value: i64 = token
                    .parse()
                    .map_err(|_| anyhow!("Line {}: invalid literal '{}'", line_no + 1, token))?;
                if value == 0 {
                    clauses.push(Clause::weighted(
                        std::mem::take(&mut literals),
                        weight.take().unwrap_or(1.0),
                    ));
                } else {
                    let literal = i32::try_from(value).map_err(|_| {
                        anyhow!("Line {}: literal '{}' out of range", line_no + 1, token)
                    })?;
                    literals.push(literal);
                }
            }
        }

        // A trailing clause missing its 0 terminator is kept.
        if !literals.is_empty() {
            clauses.push(Clause::weighted(literals, weight.unwrap_or(1.0)));
        }

        let header = header.ok_or_else(|| anyhow!("Missing problem line"))?;
        if clauses.len() != header.num_clauses {
            return Err(anyhow!(
                "Invalid number of clauses. Expected: {}, Actual: {}",
                header.num_clauses,
                clauses.len()
            ));
        }
        Self::new(header.num_variables, clauses)
    }

    pub fn to_dimacs(&self) -> String {
        let weighted = self.is_weighted();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "p {} {} {}",
            if weighted { "wcnf" } else { "cnf" },
            self.num_variables(),
            self.num_clauses()
        );
        for clause in self.clauses() {
            if weighted {
                let _ = write!(out, "{} ", clause.weight());
            }
            for &literal in clause.literals() {
                let _ = write!(out, "{} ", literal);
            }
            let _ = writeln!(out, "0");
        }
        out
    }
}

fn parse_problem_line(line: &str, line_no: usize) -> Result<Header> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    // "p wcnf N M" may carry a trailing top weight, which we accept and ignore
    if tokens.len() < 4 || tokens.len() > 5 {
        return Err(anyhow!("Line {}: malformed problem line", line_no + 1));
    }
    let weighted = match tokens[1] {
        "cnf" => false,
        "wcnf" => true,
        other => {
            return Err(anyhow!(
                "Line {}: unsupported format '{}'. Expected cnf or wcnf",
                line_no + 1,
                other
            ))
        }
    };
    let num_variables: usize = tokens[2]
        .parse()
        .map_err(|_| anyhow!("Line {}: invalid variable count '{}'", line_no + 1, tokens[2]))?;
    let num_clauses: usize = tokens[3]
        .parse()
        .map_err(|_| anyhow!("Line {}: invalid clause count '{}'", line_no + 1, tokens[3]))?;
    Ok(Header {
        weighted,
        num_variables,
        num_clauses,
    })
}
