use anyhow::{anyhow, Result};
use clap::{arg, Command};
use serde_json::json;
use std::{fs, io::Read, path::PathBuf, time::Duration};
use wsat_engine::{solve, FlipPolicy, ObjectiveKind, ObjectiveValue, SearchConfig, Status};
use wsat_formula::{Assignment, Formula, Solution};

fn cli() -> Command {
    Command::new("wsat")
        .about("Stochastic local-search SAT/MaxSAT solver")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Searches for a satisfying assignment")
                .arg(
                    arg!(<CNF> "DIMACS cnf/wcnf string, path to a file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the deterministic random stream")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"max-time" [SECONDS] "Wall-clock budget in seconds")
                        .default_value("10")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--noise [NOISE] "Random-walk probability")
                        .default_value("0.05")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--"restart-prob" [PROB] "Random restart probability per step")
                        .default_value("0")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--objective [OBJECTIVE] "Objective to report: bool, count or weight")
                        .default_value("bool")
                        .value_parser(["bool", "count", "weight"]),
                )
                .arg(
                    arg!(--"flip-policy" [POLICY] "Greedy rule: net-gain or min-break")
                        .default_value("net-gain")
                        .value_parser(["net-gain", "min-break"]),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the result json is saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Checks an assignment against every clause")
                .arg(
                    arg!(<CNF> "DIMACS cnf/wcnf string, path to a file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<ASSIGNMENT> "Assignment json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Emits a random k-SAT instance in DIMACS format")
                .arg(arg!(<NUM_VARIABLES> "Number of variables").value_parser(clap::value_parser!(usize)))
                .arg(arg!(<NUM_CLAUSES> "Number of clauses").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--seed [SEED] "Generation seed")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"clause-size" [K] "Literals per clause")
                        .default_value("3")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"min-weight" [MIN] "Lower bound of the clause weight range")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--"max-weight" [MAX] "Upper bound of the clause weight range")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve_formula(
            sub_m.get_one::<String>("CNF").unwrap().clone(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            *sub_m.get_one::<u64>("max-time").unwrap(),
            *sub_m.get_one::<f64>("noise").unwrap(),
            *sub_m.get_one::<f64>("restart-prob").unwrap(),
            sub_m.get_one::<String>("objective").unwrap().clone(),
            sub_m.get_one::<String>("flip-policy").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify", sub_m)) => verify_assignment(
            sub_m.get_one::<String>("CNF").unwrap().clone(),
            sub_m.get_one::<String>("ASSIGNMENT").unwrap().clone(),
        ),
        Some(("generate", sub_m)) => generate_instance(
            *sub_m.get_one::<usize>("NUM_VARIABLES").unwrap(),
            *sub_m.get_one::<usize>("NUM_CLAUSES").unwrap(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            *sub_m.get_one::<usize>("clause-size").unwrap(),
            sub_m.get_one::<f64>("min-weight").cloned(),
            sub_m.get_one::<f64>("max-weight").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve_formula(
    cnf: String,
    seed: u64,
    max_time_s: u64,
    noise: f64,
    restart_probability: f64,
    objective: String,
    flip_policy: String,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let formula = load_formula(&cnf)?;

    let mut config = SearchConfig::new(seed, Duration::from_secs(max_time_s));
    config.noise = noise;
    config.restart_probability = restart_probability;
    config.objective = match objective.as_str() {
        "bool" => ObjectiveKind::Boolean,
        "count" => ObjectiveKind::Count,
        "weight" => ObjectiveKind::WeightedSum,
        other => return Err(anyhow!("Unsupported objective '{}'", other)),
    };
    config.flip_policy = match flip_policy.as_str() {
        "net-gain" => FlipPolicy::NetGain,
        "min-break" => FlipPolicy::MinBreak,
        other => return Err(anyhow!("Unsupported flip policy '{}'", other)),
    };

    let outcome = solve(&formula, &config)?;

    let result = json!({
        "status": match outcome.status {
            Status::Solved => "solved",
            Status::TimedOut => "timed_out",
        },
        "objective": match outcome.objective {
            ObjectiveValue::Boolean(satisfied) => json!(satisfied),
            ObjectiveValue::Count(count) => json!(count),
            ObjectiveValue::WeightedSum(weight) => json!(weight),
        },
        "flips": outcome.flips,
        "restarts": outcome.restarts,
        "assignment": Solution::from(&outcome.assignment),
    });
    if let Some(path) = output_file {
        fs::write(&path, serde_json::to_string(&result)?)?;
        println!("result written to: {:?}", path);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }

    if outcome.status != Status::Solved {
        eprintln!("Budget exhausted before full satisfaction");
        std::process::exit(85);
    }
    Ok(())
}

fn verify_assignment(cnf: String, assignment: String) -> Result<()> {
    let formula = load_formula(&cnf)?;
    let solution = load_solution(&assignment)?;
    let assignment = Assignment::try_from(&solution)?;

    match formula.verify_assignment(&assignment) {
        Ok(()) => {
            println!("Assignment is satisfying");
            Ok(())
        }
        Err(e) => {
            eprintln!("Verification error: {}", e);
            std::process::exit(1);
        }
    }
}

fn generate_instance(
    num_variables: usize,
    num_clauses: usize,
    seed: u64,
    clause_size: usize,
    min_weight: Option<f64>,
    max_weight: Option<f64>,
) -> Result<()> {
    let weight_range = match (min_weight, max_weight) {
        (Some(lo), Some(hi)) => Some((lo, hi)),
        (None, None) => None,
        _ => {
            return Err(anyhow!(
                "--min-weight and --max-weight must be given together"
            ))
        }
    };
    let formula = Formula::random_ksat(seed, num_variables, num_clauses, clause_size, weight_range)?;
    print!("{}", formula.to_dimacs());
    Ok(())
}

fn load_formula(cnf: &str) -> Result<Formula> {
    let text = if cnf == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read formula from stdin: {}", e))?;
        buffer
    } else if cnf.ends_with(".cnf") || cnf.ends_with(".wcnf") || PathBuf::from(cnf).is_file() {
        fs::read_to_string(cnf).map_err(|e| anyhow!("Failed to read formula file: {}", e))?
    } else {
        cnf.to_string()
    };
    Formula::from_dimacs(&text)
}

fn load_solution(assignment: &str) -> Result<Solution> {
    let text = if assignment == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read assignment from stdin: {}", e))?;
        buffer
    } else if assignment.ends_with(".json") {
        fs::read_to_string(assignment)
            .map_err(|e| anyhow!("Failed to read assignment file: {}", e))?
    } else {
        assignment.to_string()
    };
    serde_json::from_str::<Solution>(&text).map_err(|e| anyhow!("Failed to parse assignment: {}", e))
}
