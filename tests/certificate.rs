//! Soundness of the certificate journal: every recorded derivation must be
//! implied by the original formula.
use satyr::{cdb::CertifiedRecord, *};

fn implied_by(clauses: &[Vec<i32>], derived: &[i32], num_vars: usize) -> bool {
    // formula && !derived must be unsatisfiable (checked exhaustively)
    assert!(num_vars <= 20);
    'outer: for bits in 0..(1u32 << num_vars) {
        let val = |l: i32| {
            let v = l.unsigned_abs() as usize;
            let b = bits & (1 << (v - 1)) != 0;
            if l < 0 {
                !b
            } else {
                b
            }
        };
        for c in clauses {
            if !c.iter().any(|l| val(*l)) {
                continue 'outer;
            }
        }
        if derived.iter().any(|l| val(*l)) {
            continue 'outer;
        }
        return false;
    }
    true
}

fn unsat_instance() -> Vec<Vec<i32>> {
    // 4 pigeons into 3 holes
    let holes = 3;
    let var = |p: usize, h: usize| (p * holes + h + 1) as i32;
    let mut clauses = Vec::new();
    for p in 0..4 {
        clauses.push((0..holes).map(|h| var(p, h)).collect::<Vec<i32>>());
    }
    for h in 0..holes {
        for p in 0..4 {
            for q in p + 1..4 {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    clauses
}

#[test]
fn every_learnt_clause_is_implied() {
    let clauses = unsat_instance();
    let config = Config {
        use_certification: true,
        use_lucky_phases: false,
        ..Config::default()
    };
    let mut s = Solver::instantiate(
        &config,
        &CNFDescription {
            num_of_variables: 12,
            num_of_clauses: clauses.len(),
        },
    );
    for c in &clauses {
        s.add_clause(c.as_slice()).expect("consistent input");
    }
    assert_eq!(s.solve(), Ok(Certificate::UNSAT));
    let journal = s.cdb.certification.take_journal();
    assert!(!journal.is_empty(), "no derivation was recorded");
    let mut adds = 0;
    for rec in &journal {
        if let CertifiedRecord::Add { lits, .. } = rec {
            adds += 1;
            assert!(
                implied_by(&clauses, lits, 12),
                "unsound derivation {lits:?}"
            );
        }
    }
    assert!(0 < adds);
}

#[test]
fn strict_mode_records_antecedent_chains() {
    let clauses = unsat_instance();
    let config = Config {
        use_certification: true,
        strict_certification: true,
        use_lucky_phases: false,
        ..Config::default()
    };
    let mut s = Solver::instantiate(
        &config,
        &CNFDescription {
            num_of_variables: 12,
            num_of_clauses: clauses.len(),
        },
    );
    for c in &clauses {
        s.add_clause(c.as_slice()).expect("consistent input");
    }
    assert_eq!(s.solve(), Ok(Certificate::UNSAT));
    let journal = s.cdb.certification.take_journal();
    let with_chain = journal
        .iter()
        .filter(|r| matches!(r, CertifiedRecord::Add { antecedents, .. } if !antecedents.is_empty()))
        .count();
    assert!(0 < with_chain, "no antecedent chain was recorded");
}

#[test]
fn deletions_reference_recorded_clauses() {
    let clauses = unsat_instance();
    let config = Config {
        use_certification: true,
        use_lucky_phases: false,
        ..Config::default()
    };
    let mut s = Solver::instantiate(
        &config,
        &CNFDescription {
            num_of_variables: 12,
            num_of_clauses: clauses.len(),
        },
    );
    for c in &clauses {
        s.add_clause(c.as_slice()).expect("consistent input");
    }
    let _ = s.solve();
    let journal = s.cdb.certification.take_journal();
    let mut live: std::collections::HashSet<u64> = std::collections::HashSet::new();
    for rec in &journal {
        match rec {
            CertifiedRecord::Add { uid, .. } => {
                live.insert(*uid);
            }
            CertifiedRecord::Delete { uid, .. } => {
                assert!(live.remove(uid), "deleted a clause never added: {uid}");
            }
        }
    }
}
