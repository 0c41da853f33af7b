//! Solver Builder
use {
    super::{restart::RestartManager, Certificate, Solver, SolverEvent, SolverResult},
    crate::{
        assign::{AssignIF, AssignStack, PropagateIF},
        cdb::{ClauseDB, ClauseDBIF, ClauseId},
        state::State,
        types::*,
    },
};

/// API for SAT solver creation and modification.
pub trait SatSolverIF: Instantiate {
    /// add an assignment to Solver.
    ///
    /// # Errors
    ///
    /// * `SolverError::Inconsistent` if it conflicts with existing assignments.
    /// * `SolverError::OutOfRange` if it is out of range for var index.
    fn add_assignment(&mut self, val: i32) -> Result<&mut Solver, SolverError>;
    /// add a clause to Solver, simplifying it against the root level on the
    /// way in.
    ///
    /// # Errors
    ///
    /// * `SolverError::Inconsistent` if the clause simplifies to the empty
    ///   clause or its unit propagation conflicts; the instance is
    ///   permanently unsatisfiable afterwards.
    /// * `SolverError::OutOfRange` if a literal is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use crate::satyr::*;
    ///
    /// let mut s = Solver::instantiate(
    ///     &Config::default(),
    ///     &CNFDescription { num_of_variables: 2, num_of_clauses: 2 },
    /// );
    /// assert!(s.add_clause(vec![1, 2]).is_ok());
    /// assert!(s.add_clause(vec![-1, -2]).is_ok());
    /// assert!(matches!(s.add_clause(vec![0]), Err(SolverError::OutOfRange)));
    /// ```
    fn add_clause<V>(&mut self, vec: V) -> Result<&mut Solver, SolverError>
    where
        V: AsRef<[i32]>;
    /// add a var to solver and return the number of vars.
    fn add_var(&mut self) -> usize;
}

impl Default for Solver {
    fn default() -> Solver {
        Solver {
            asg: AssignStack::default(),
            cdb: ClauseDB::default(),
            rst: RestartManager::default(),
            state: State::default(),
        }
    }
}

impl Instantiate for Solver {
    /// ```
    /// use crate::{satyr::config::Config, satyr::types::*};
    /// use satyr::solver::Solver;
    /// let s = Solver::instantiate(&Config::default(), &CNFDescription::default());
    /// ```
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Solver {
        Solver {
            asg: AssignStack::instantiate(config, cnf),
            cdb: ClauseDB::instantiate(config, cnf),
            rst: RestartManager::instantiate(config, cnf),
            state: State::instantiate(config, cnf),
        }
    }
}

impl<V> TryFrom<(Config, &[V])> for Solver
where
    V: AsRef<[i32]>,
{
    type Error = SolverResult;
    /// make a solver from a clause set; an inconsistent input maps to
    /// `Err(Ok(Certificate::UNSAT))`.
    fn try_from((config, vec): (Config, &[V])) -> Result<Self, Self::Error> {
        let cnf = CNFDescription::from(vec);
        let mut s = Solver::instantiate(&config, &cnf);
        for ints in vec.iter() {
            if let Err(e) = s.add_clause(ints.as_ref()) {
                return match e {
                    SolverError::Inconsistent => Err(Ok(Certificate::UNSAT)),
                    e => Err(Err(e)),
                };
            }
        }
        Ok(s)
    }
}

impl SatSolverIF for Solver {
    fn add_assignment(&mut self, val: i32) -> Result<&mut Solver, SolverError> {
        if val == 0 || self.asg.num_vars < val.unsigned_abs() as usize {
            return Err(SolverError::OutOfRange);
        }
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut state,
            ..
        } = self;
        match asg.assign_at_root_level(Lit::from(val)) {
            Ok(()) => {
                if asg.propagate(cdb).is_some() {
                    state.unsat = true;
                    return Err(SolverError::Inconsistent);
                }
                Ok(self)
            }
            Err(_) => {
                state.unsat = true;
                Err(SolverError::Inconsistent)
            }
        }
    }
    fn add_clause<V>(&mut self, vec: V) -> Result<&mut Solver, SolverError>
    where
        V: AsRef<[i32]>,
    {
        for i in vec.as_ref().iter() {
            if *i == 0 || self.asg.num_vars < i.unsigned_abs() as usize {
                return Err(SolverError::OutOfRange);
            }
        }
        let mut clause = vec
            .as_ref()
            .iter()
            .map(|i| Lit::from(*i))
            .collect::<Vec<Lit>>();
        if self.add_unchecked_clause(&mut clause).is_none() {
            self.state.unsat = true;
            return Err(SolverError::Inconsistent);
        }
        Ok(self)
    }
    fn add_var(&mut self) -> usize {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut state,
            ..
        } = self;
        asg.handle(SolverEvent::NewVar);
        cdb.handle(SolverEvent::NewVar);
        state.handle(SolverEvent::NewVar);
        asg.num_vars
    }
}

impl Solver {
    /// simplify a clause against the root level and register what remains:
    /// nothing for a satisfied clause, an immediate propagation for a unit,
    /// a watched clause otherwise. `None` means the instance became
    /// unsatisfiable.
    fn add_unchecked_clause(&mut self, lits: &mut Vec<Lit>) -> Option<ClauseId> {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ..
        } = self;
        debug_assert_eq!(asg.decision_level(), asg.root_level);
        if lits.is_empty() {
            return None;
        }
        lits.sort();
        let mut j = 0;
        let mut last: Option<Lit> = None;
        for i in 0..lits.len() {
            let li = lits[i];
            let sat = asg.assigned(li);
            if sat == Some(true) || last == Some(!li) {
                // satisfied or tautological
                return Some(ClauseId::default());
            } else if sat != Some(false) && last != Some(li) {
                lits[j] = li;
                j += 1;
                last = Some(li);
            }
        }
        lits.truncate(j);
        match lits.len() {
            0 => None,
            1 => {
                if asg.assign_at_root_level(lits[0]).is_err() {
                    return None;
                }
                if asg.propagate(cdb).is_some() {
                    return None;
                }
                Some(ClauseId::default())
            }
            _ => Some(cdb.new_clause(&*asg, lits, false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{assign::AssignIF, *};

    #[test]
    fn simplification_on_ingest() {
        let mut s = Solver::instantiate(
            &Config::default(),
            &CNFDescription {
                num_of_variables: 3,
                num_of_clauses: 4,
            },
        );
        // tautology and duplicate literals vanish
        assert!(s.add_clause(vec![1, -1, 2]).is_ok());
        assert!(s.add_clause(vec![2, 2, 3]).is_ok());
        assert_eq!(s.cdb.num_clause(), 1);
        // a unit is asserted, not stored
        assert!(s.add_clause(vec![-3]).is_ok());
        assert_eq!(s.cdb.num_clause(), 1);
        assert_eq!(s.asg.assign(3), Some(false));
        // a clause satisfied at the root is dropped
        assert!(s.add_clause(vec![-3, 1]).is_ok());
        assert_eq!(s.cdb.num_clause(), 1);
    }

    #[test]
    fn empty_clause_is_terminal() {
        let mut s = Solver::instantiate(
            &Config::default(),
            &CNFDescription {
                num_of_variables: 1,
                num_of_clauses: 2,
            },
        );
        assert!(s.add_clause(vec![1]).is_ok());
        assert!(matches!(
            s.add_clause(vec![-1]),
            Err(SolverError::Inconsistent)
        ));
        assert_eq!(s.solve(), Ok(Certificate::UNSAT));
    }

    #[test]
    fn add_var_grows_everything() {
        let mut s = Solver::instantiate(
            &Config::default(),
            &CNFDescription {
                num_of_variables: 1,
                num_of_clauses: 1,
            },
        );
        assert_eq!(s.add_var(), 2);
        assert!(s.add_clause(vec![-1, 2]).is_ok());
        assert!(s.add_assignment(1).is_ok());
        assert_eq!(s.asg.assign(2), Some(true));
    }
}
