//! Module `types` provides various building blocks, including
//! some common traits.

/// methods on exponential moving averages
pub mod ema;
/// methods on flags used in Var and Clause
pub mod flags;
/// methods on literals
pub mod lit;
/// methods on the Luby restart sequence
pub mod luby;

pub use self::{ema::*, flags::*, lit::*, luby::*};

pub use crate::{assign::AssignReason, config::Config, solver::SolverEvent};

use thiserror::Error;

/// Identifier of a variable, a positive integer starting at 1.
pub type VarId = usize;

/// The nesting depth of branching decisions; 0 at the root.
pub type DecisionLevel = u32;

/// API for object instantiation based on `Config` and `CNFDescription`.
/// This is implemented by all the major modules.
///
/// # Example
///
/// ```
/// use crate::{satyr::config::Config, satyr::types::*};
/// use satyr::{cdb::ClauseDB, solver::Solver};
/// let _ = ClauseDB::instantiate(&Config::default(), &CNFDescription::default());
/// let _ = Solver::instantiate(&Config::default(), &CNFDescription::default());
/// ```
pub trait Instantiate {
    /// make and return an object from `Config` and `CNFDescription`.
    fn instantiate(conf: &Config, cnf: &CNFDescription) -> Self;
    /// update by a solver event.
    fn handle(&mut self, _e: SolverEvent) {}
}

/// API for activity-based rewarding, implemented over `VarId` by the
/// assignment stack and over `ClauseId` by the clause database.
pub trait ActivityIF<Ix> {
    /// return one's activity.
    fn activity(&self, ix: Ix) -> f64;
    /// bump one's activity during conflict analysis.
    fn reward_at_analysis(&mut self, ix: Ix);
    /// scale the bump increment up after a conflict, implementing lazy decay.
    fn decay_activity(&mut self);
}

/// The size of a CNF formula, used to pre-size every module.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
}

impl<V: AsRef<[i32]>> From<&[V]> for CNFDescription {
    fn from(vec: &[V]) -> Self {
        let num_of_variables = vec
            .iter()
            .flat_map(|c| c.as_ref().iter())
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        CNFDescription {
            num_of_variables,
            num_of_clauses: vec.len(),
        }
    }
}

/// Errors and non-terminal outcomes raised by the solver.
///
/// Note: budget exhaustion and interruption leave the solver in a consistent
/// state; calling [`solve`](`crate::solver::SolveIF::solve`) again with a
/// fresh budget resumes the search.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SolverError {
    /// an empty clause was given or derived while loading the problem.
    #[error("empty clause")]
    EmptyClause,
    /// the given clause set is inconsistent.
    #[error("inconsistent problem")]
    Inconsistent,
    /// unit propagation conflicted at the root level.
    #[error("conflict at the root level")]
    RootLevelConflict,
    /// a literal refers to a variable out of the registered range.
    #[error("literal out of range")]
    OutOfRange,
    /// the clause database outgrew its soft limit.
    #[error("clause database exceeded the soft limit")]
    OutOfMemory,
    /// the wall-clock limit was reached.
    #[error("time limit exceeded")]
    TimeOut,
    /// the conflict or propagation budget was reached.
    #[error("search budget exceeded")]
    BudgetExceeded,
    /// an asynchronous interrupt was observed.
    #[error("solving was interrupted")]
    Interrupted,
    /// an internal invariant was broken; this is a bug.
    #[error("internal inconsistency")]
    SolverBug,
}

/// A return type used by fallible solver functions.
pub type MaybeInconsistent = Result<(), SolverError>;
