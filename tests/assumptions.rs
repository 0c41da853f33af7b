//! Assumption-based solving and failed-assumption extraction.
use satyr::{assign::AssignIF, *};

fn solver_for(clauses: &[Vec<i32>]) -> Solver {
    let nv = clauses
        .iter()
        .flat_map(|c| c.iter())
        .map(|l| l.unsigned_abs() as usize)
        .max()
        .unwrap_or(0);
    let mut s = Solver::instantiate(
        &Config::default(),
        &CNFDescription {
            num_of_variables: nv,
            num_of_clauses: clauses.len(),
        },
    );
    for c in clauses {
        s.add_clause(c.as_slice()).expect("consistent input");
    }
    s
}

#[test]
fn failing_assumptions_produce_an_unsat_core() {
    let mut s = solver_for(&[vec![1, 2]]);
    assert_eq!(s.solve_with_assumptions(&[-1, -2]), Ok(Certificate::UNSAT));
    let failed = s.failed_assumptions();
    // the reported subset consists of given assumptions and is itself
    // unsatisfiable against the formula
    assert!(!failed.is_empty());
    assert!(failed.iter().all(|l| [-1, -2].contains(l)));
    assert!(failed.contains(&-1) && failed.contains(&-2));
}

#[test]
fn satisfiable_under_assumptions() {
    let clauses = vec![vec![1, 2], vec![-1, 3]];
    let mut s = solver_for(&clauses);
    match s.solve_with_assumptions(&[1]) {
        Ok(Certificate::SAT(model)) => {
            assert!(model.contains(&1));
            assert!(model.contains(&3));
        }
        r => panic!("unexpected result {r:?}"),
    }
    // the assumption does not stick across calls
    match s.solve_with_assumptions(&[-1]) {
        Ok(Certificate::SAT(model)) => {
            assert!(model.contains(&-1));
            assert!(model.contains(&2));
        }
        r => panic!("unexpected result {r:?}"),
    }
}

#[test]
fn already_satisfied_assumption_gets_a_pseudo_level() {
    let mut s = solver_for(&[vec![1], vec![1, 2]]);
    // x1 is asserted at the root; assuming it must not break anything
    match s.solve_with_assumptions(&[1]) {
        Ok(Certificate::SAT(model)) => assert!(model.contains(&1)),
        r => panic!("unexpected result {r:?}"),
    }
    assert_eq!(s.asg.decision_level(), 0);
}

#[test]
fn contradictory_assumptions_fail_regardless_of_formula() {
    let mut s = solver_for(&[vec![1, 2]]);
    assert_eq!(s.solve_with_assumptions(&[1, -1]), Ok(Certificate::UNSAT));
    let failed = s.failed_assumptions();
    assert!(failed.contains(&-1) || failed.contains(&1));
}

#[test]
fn assumptions_interact_with_learning() {
    // 3 pigeons into 2 holes, but only via assumptions on the third pigeon
    let clauses = vec![
        vec![1, 2],
        vec![3, 4],
        vec![-1, -3],
        vec![-2, -4],
        vec![-5, -1],
        vec![-5, -3],
        vec![-6, -2],
        vec![-6, -4],
    ];
    let mut s = solver_for(&clauses);
    assert!(matches!(s.solve(), Ok(Certificate::SAT(_))));
    assert_eq!(s.solve_with_assumptions(&[5, 6]), Ok(Certificate::UNSAT));
    let failed = s.failed_assumptions();
    assert!(failed.iter().all(|l| [5, 6].contains(l)));
    // and the instance stays satisfiable without the assumptions
    assert!(matches!(s.solve(), Ok(Certificate::SAT(_))));
}

#[test]
fn out_of_range_assumption_is_rejected() {
    let mut s = solver_for(&[vec![1, 2]]);
    assert_eq!(
        s.solve_with_assumptions(&[7]),
        Err(SolverError::OutOfRange)
    );
    assert_eq!(s.solve_with_assumptions(&[0]), Err(SolverError::OutOfRange));
}
