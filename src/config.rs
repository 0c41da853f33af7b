//! Solver configuration. All knobs are plain public fields; CLI parsing is
//! the caller's business.

/// How learnt clauses are minimized after conflict analysis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MinimizeMode {
    /// keep the first-UIP clause as derived.
    None,
    /// drop a literal if all non-root literals of its reason are already in
    /// the clause.
    Basic,
    /// full recursive redundancy check over the implication graph.
    #[default]
    Deep,
}

/// Which structure orders branching candidates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum VarSelection {
    /// a max-heap over decaying activity scores.
    #[default]
    Activity,
    /// a queue ordered by most-recently-bumped, with cursor reuse across
    /// backtracking.
    Recency,
}

/// Solver's parameters; controls for search, learning and resources.
#[derive(Clone, Debug)]
pub struct Config {
    //
    //## heuristics
    //
    /// decay rate of variable activity scores
    pub var_activity_decay: f64,
    /// decay rate of clause activity scores
    pub clause_activity_decay: f64,
    /// learnt clause minimization mode
    pub minimize_mode: MinimizeMode,
    /// branching variable selection strategy
    pub var_selection: VarSelection,
    /// probability of a uniformly random branching variable
    pub rnd_decision_freq: f64,
    /// seed for the random decision rule
    pub rnd_seed: u64,
    /// default polarity used before any phase information exists
    pub initial_phase: bool,
    /// use target phases while the restart schedule is stabilizing
    pub use_target_phase: bool,

    //
    //## search
    //
    /// try cheap total assignments before full CDCL
    pub use_lucky_phases: bool,
    /// follow the Luby sequence for restart intervals; geometric otherwise
    pub luby_restart: bool,
    /// conflicts per Luby unit, or the first geometric interval
    pub restart_step: usize,
    /// growth factor of geometric restart intervals
    pub restart_inc: f64,

    //
    //## clause database reduction
    //
    /// enable learnt clause reduction
    pub use_reduce: bool,
    /// initial learnt cap as a fraction of the original clause count
    pub learntsize_factor: f64,
    /// growth factor of the learnt cap on each adjustment
    pub learntsize_inc: f64,
    /// conflicts before the first cap adjustment
    pub learntsize_adjust_start: usize,
    /// growth factor of the adjustment interval itself
    pub learntsize_adjust_inc: f64,

    //
    //## certification
    //
    /// record learnt and deleted clauses for an external proof writer
    pub use_certification: bool,
    /// also record antecedent chains for strict derivation checking
    pub strict_certification: bool,

    //
    //## resource budgets; 0 disables a limit
    //
    /// max live clauses before reporting out of memory
    pub cdb_soft_limit: usize,
    /// max conflicts per solve call
    pub conflict_budget: usize,
    /// max propagations per solve call
    pub propagation_budget: usize,
    /// wall-clock limit in seconds per solve call
    pub time_limit: f64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            var_activity_decay: 0.95,
            clause_activity_decay: 0.999,
            minimize_mode: MinimizeMode::Deep,
            var_selection: VarSelection::Activity,
            rnd_decision_freq: 0.0,
            rnd_seed: 0x5851_f42d_4c95_7f2d,
            initial_phase: false,
            use_target_phase: true,
            use_lucky_phases: true,
            luby_restart: true,
            restart_step: 100,
            restart_inc: 2.0,
            use_reduce: true,
            learntsize_factor: 1.0 / 3.0,
            learntsize_inc: 1.1,
            learntsize_adjust_start: 100,
            learntsize_adjust_inc: 1.5,
            use_certification: false,
            strict_certification: false,
            cdb_soft_limit: 18_000_000,
            conflict_budget: 0,
            propagation_budget: 0,
            time_limit: 0.0,
        }
    }
}
