use wsat_ffi::{wsat_solve, WSAT_MALFORMED_INPUT, WSAT_SOLVED, WSAT_TIMED_OUT};

#[test]
fn test_solves_through_the_boundary() {
    // (x1 v x2) (-x1 v x2) (x1 v -x2)
    let stream: Vec<i64> = vec![1, 2, 0, -1, 2, 0, 1, -2, 0];
    let mut assignment = vec![0i8; 3];
    let mut objective = f64::NAN;

    let status = unsafe {
        wsat_solve(
            42,
            1,
            0.05,
            2,
            3,
            stream.as_ptr(),
            std::ptr::null(),
            assignment.as_mut_ptr(),
            &mut objective,
        )
    };

    assert_eq!(status, WSAT_SOLVED);
    assert_eq!(objective, 0.0);
    assert_eq!(assignment[0], 0);
    assert_eq!(assignment[1], 1);
    assert_eq!(assignment[2], 1);
}

#[test]
fn test_timeout_reports_best_count() {
    // (x1) (-x1) is unsatisfiable; exactly one clause stays falsified
    let stream: Vec<i64> = vec![1, 0, -1, 0];
    let mut assignment = vec![0i8; 2];
    let mut objective = f64::NAN;

    let status = unsafe {
        wsat_solve(
            7,
            1,
            0.05,
            1,
            2,
            stream.as_ptr(),
            std::ptr::null(),
            assignment.as_mut_ptr(),
            &mut objective,
        )
    };

    assert_eq!(status, WSAT_TIMED_OUT);
    assert_eq!(objective, 1.0);
    assert!(assignment[1] == 1 || assignment[1] == -1);
}

#[test]
fn test_weighted_objective_through_the_boundary() {
    let stream: Vec<i64> = vec![1, 0, -1, 0];
    let weights = [2.5f64, 4.0];
    let mut assignment = vec![0i8; 2];
    let mut objective = f64::NAN;

    let status = unsafe {
        wsat_solve(
            5,
            1,
            0.05,
            1,
            2,
            stream.as_ptr(),
            weights.as_ptr(),
            assignment.as_mut_ptr(),
            &mut objective,
        )
    };

    assert_eq!(status, WSAT_TIMED_OUT);
    // the cheaper side: keep the weight-4 clause satisfied
    assert_eq!(objective, 2.5);
    assert_eq!(assignment[1], -1);
}

#[test]
fn test_rejects_malformed_stream() {
    // literal 3 exceeds the declared 2 variables
    let stream: Vec<i64> = vec![1, 3, 0];
    let mut assignment = vec![0i8; 3];

    let status = unsafe {
        wsat_solve(
            0,
            1,
            0.05,
            2,
            1,
            stream.as_ptr(),
            std::ptr::null(),
            assignment.as_mut_ptr(),
            std::ptr::null_mut(),
        )
    };
    assert_eq!(status, WSAT_MALFORMED_INPUT);
    assert!(assignment.iter().all(|&v| v == 0));
}

#[test]
fn test_rejects_null_output_buffer() {
    let stream: Vec<i64> = vec![1, 0];
    let status = unsafe {
        wsat_solve(
            0,
            1,
            0.05,
            1,
            1,
            stream.as_ptr(),
            std::ptr::null(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    assert_eq!(status, WSAT_MALFORMED_INPUT);
}

#[test]
fn test_rejects_invalid_noise() {
    let stream: Vec<i64> = vec![1, 0];
    let mut assignment = vec![0i8; 2];
    let status = unsafe {
        wsat_solve(
            0,
            1,
            2.0,
            1,
            1,
            stream.as_ptr(),
            std::ptr::null(),
            assignment.as_mut_ptr(),
            std::ptr::null_mut(),
        )
    };
    assert_eq!(status, WSAT_MALFORMED_INPUT);
}

#[test]
fn test_empty_formula_solved_immediately() {
    let mut assignment = vec![0i8; 4];
    let mut objective = f64::NAN;
    let status = unsafe {
        wsat_solve(
            0,
            1,
            0.05,
            3,
            0,
            std::ptr::null(),
            std::ptr::null(),
            assignment.as_mut_ptr(),
            &mut objective,
        )
    };
    assert_eq!(status, WSAT_SOLVED);
    assert_eq!(objective, 0.0);
    assert!(assignment[1..].iter().all(|&v| v == 1 || v == -1));
}
