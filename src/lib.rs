//! # A CDCL SAT solver in Rust
//!
//! `satyr` decides the satisfiability of CNF formulas with conflict-driven
//! clause learning: watched-literal propagation, first-UIP learning with
//! clause minimization, activity- or recency-based branching with phase
//! saving, Luby or geometric restarts, and learnt-clause reduction. It
//! supports solving under assumptions, cooperative budgets and interrupts,
//! and an in-memory certificate journal for an external proof writer.
//!
//! File parsing, option parsing and output formatting are deliberately left
//! to the caller; clauses go in as `i32` slices and the answer comes back as
//! a [`Certificate`](`crate::solver::Certificate`).
/// Module `assign` implements Boolean constraint propagation and decision
/// var selection.
pub mod assign;
/// Module `cdb` provides the clause database and watch lists.
pub mod cdb;
/// Module `config` provides solver configuration.
pub mod config;
/// Module `solver` provides the top-level API as a SAT solver.
pub mod solver;
/// Module `state` holds runtime state and statistics.
pub mod state;
/// Plumbing layer.
pub mod types;

pub use {
    config::Config,
    solver::{Certificate, SatSolverIF, SolveIF, Solver, SolverResult, ValidateIF},
    types::{CNFDescription, Instantiate, SolverError},
};
