//! Module `solver` provides the top-level API as a SAT solver.

/// API to instantiate
mod build;
/// conflict analysis and learning
mod conflict;
/// pre-search probes for trivially satisfying assignments
mod lucky;
/// restart scheduling
pub mod restart;
/// CDCL search engine
mod search;
/// model checking
mod validate;

pub use self::{
    build::SatSolverIF,
    restart::{RestartIF, RestartManager},
    search::SolveIF,
    validate::ValidateIF,
};

use crate::{assign::AssignStack, cdb::ClauseDB, state::State, types::*};

/// Normal results returned by Solver.
#[derive(Debug, Eq, PartialEq)]
pub enum Certificate {
    /// it is satisfiable; `vec` is such an assignment sorted by var order.
    SAT(Vec<i32>),
    /// it is unsatisfiable.
    UNSAT,
}

/// The return type of `Solver::solve`. This captures the following cases:
/// * `Certificate::SAT` -- solved with a satisfiable assignment set,
/// * `Certificate::UNSAT` -- proved that it's an unsatisfiable problem, and
/// * `SolverError::*` -- interrupted or exhausted (recoverable), or a bug.
pub type SolverResult = Result<Certificate, SolverError>;

/// define sub-modules' responsibilities
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverEvent {
    /// increment the number of vars.
    NewVar,
    /// restart.
    Restart,
}

/// The SAT solver object consisting of 4 sub modules.
///
/// ```
/// use crate::satyr::*;
///
/// let mut s = Solver::try_from((
///     Config::default(),
///     vec![vec![1i32, 2], vec![-1, 2], vec![1, -2]].as_ref(),
/// ))
/// .expect("failed to load");
/// if let Ok(Certificate::SAT(v)) = s.solve() {
///     assert_eq!(v, vec![1, 2]);
/// } else {
///     panic!("stumbled");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    /// assignment management
    pub asg: AssignStack,
    /// clause container
    pub cdb: ClauseDB,
    /// restart scheduling
    pub rst: RestartManager,
    /// misc data holder
    pub state: State,
}
