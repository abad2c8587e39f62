use rand::{rngs::StdRng, SeedableRng};
use wsat_formula::{Assignment, Clause, Formula};

#[test]
fn test_new_rejects_bad_clauses() {
    assert!(Formula::new(2, vec![Clause::new(vec![])]).is_err());
    assert!(Formula::new(2, vec![Clause::new(vec![1, 0])]).is_err());
    assert!(Formula::new(2, vec![Clause::new(vec![1, 3])]).is_err());
    assert!(Formula::new(2, vec![Clause::new(vec![1, -3])]).is_err());
    assert!(Formula::new(2, vec![Clause::weighted(vec![1], -1.0)]).is_err());
    assert!(Formula::new(2, vec![Clause::weighted(vec![1], f64::NAN)]).is_err());
    assert!(Formula::new(2, vec![Clause::new(vec![1, -2]), Clause::new(vec![2])]).is_ok());
}

#[test]
fn test_from_flat_round_trip() {
    let stream = [1, 2, 0, -1, 2, 0, 1, -2, 0];
    let formula = Formula::from_flat(2, 3, &stream, None).unwrap();
    assert_eq!(formula.num_variables(), 2);
    assert_eq!(formula.num_clauses(), 3);
    assert_eq!(formula.clause(0).literals(), &[1, 2]);
    assert_eq!(formula.clause(1).literals(), &[-1, 2]);
    assert_eq!(formula.clause(2).literals(), &[1, -2]);
    assert!(!formula.is_weighted());
    assert_eq!(formula.clause(0).weight(), 1.0);
}

#[test]
fn test_from_flat_with_weights() {
    let stream = [1, 0, -1, 0];
    let formula = Formula::from_flat(1, 2, &stream, Some(&[2.5, 4.0])).unwrap();
    assert!(formula.is_weighted());
    assert_eq!(formula.clause(0).weight(), 2.5);
    assert_eq!(formula.clause(1).weight(), 4.0);
}

#[test]
fn test_from_flat_rejects_inconsistent_input() {
    // stream ends before the declared clause count
    assert!(Formula::from_flat(2, 2, &[1, 2, 0], None).is_err());
    // stream continues past the declared clause count
    assert!(Formula::from_flat(2, 1, &[1, 0, 2, 0], None).is_err());
    // empty clause: two consecutive terminators
    assert!(Formula::from_flat(2, 2, &[1, 0, 0], None).is_err());
    // literal magnitude outside the declared range
    assert!(Formula::from_flat(2, 1, &[3, 0], None).is_err());
    // weight vector length mismatch
    assert!(Formula::from_flat(2, 1, &[1, 0], Some(&[1.0, 2.0])).is_err());
}

#[test]
fn test_assignment_satisfies() {
    let assignment = Assignment::from_polarities(&[1, -1]).unwrap();
    assert!(assignment.satisfies(1));
    assert!(!assignment.satisfies(-1));
    assert!(assignment.satisfies(-2));
    assert!(!assignment.satisfies(2));
}

#[test]
fn test_assignment_flip() {
    let mut assignment = Assignment::from_polarities(&[1, -1]).unwrap();
    assignment.flip(1);
    assert_eq!(assignment.value(1), -1);
    assignment.flip(1);
    assert_eq!(assignment.value(1), 1);
    assert_eq!(assignment.value(0), 0);
}

#[test]
fn test_assignment_rejects_bad_polarities() {
    assert!(Assignment::from_polarities(&[1, 0]).is_err());
    assert!(Assignment::from_polarities(&[2]).is_err());
}

#[test]
fn test_random_assignment_polarities() {
    let mut rng = StdRng::seed_from_u64(7);
    let assignment = Assignment::random(100, &mut rng);
    assert_eq!(assignment.num_variables(), 100);
    assert_eq!(assignment.value(0), 0);
    assert!(assignment.polarities().iter().all(|&p| p == 1 || p == -1));
}

#[test]
fn test_verify_assignment() {
    let formula = Formula::new(
        2,
        vec![
            Clause::new(vec![1, 2]),
            Clause::new(vec![-1, 2]),
            Clause::new(vec![1, -2]),
        ],
    )
    .unwrap();

    let satisfying = Assignment::from_polarities(&[1, 1]).unwrap();
    assert!(formula.verify_assignment(&satisfying).is_ok());
    assert_eq!(formula.first_unsatisfied(&satisfying), None);
    assert_eq!(formula.unsatisfied_count(&satisfying), 0);

    let falsifying = Assignment::from_polarities(&[-1, -1]).unwrap();
    assert!(formula.verify_assignment(&falsifying).is_err());
    assert_eq!(formula.first_unsatisfied(&falsifying), Some(0));
    assert_eq!(formula.unsatisfied_count(&falsifying), 1);

    let short = Assignment::from_polarities(&[1]).unwrap();
    assert!(formula.verify_assignment(&short).is_err());
}

#[test]
fn test_unsatisfied_weight() {
    let formula = Formula::new(
        1,
        vec![
            Clause::weighted(vec![1], 2.0),
            Clause::weighted(vec![-1], 3.0),
        ],
    )
    .unwrap();
    let assignment = Assignment::from_polarities(&[1]).unwrap();
    assert_eq!(formula.unsatisfied_weight(&assignment), 3.0);
    let assignment = Assignment::from_polarities(&[-1]).unwrap();
    assert_eq!(formula.unsatisfied_weight(&assignment), 2.0);
}
