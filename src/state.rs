//! Runtime state: working buffers, budgets, and progress reporting.
use {
    crate::{
        assign::AssignStack,
        cdb::ClauseDB,
        types::*,
    },
    std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Instant,
    },
};

/// API for state/statistics management.
pub trait StateIF {
    /// report the current search state through the logger.
    fn progress(&self, asg: &AssignStack, cdb: &ClauseDB);
    /// reset the clocks and budget baselines at the start of a solve call.
    fn reset_budgets(&mut self, asg: &AssignStack);
    /// check interrupt, budget and time limits.
    ///
    /// # Errors
    ///
    /// * `SolverError::Interrupted` on an external interrupt.
    /// * `SolverError::BudgetExceeded` past the conflict/propagation budget.
    /// * `SolverError::TimeOut` past the wall-clock limit.
    fn check_resources(&self, asg: &AssignStack) -> MaybeInconsistent;
}

/// Everything the search needs besides the trail and the clause database.
#[derive(Clone, Debug)]
pub struct State {
    /// solver configuration
    pub config: Config,
    /// the instance was proven inconsistent while loading
    pub unsat: bool,
    /// the size of the loaded problem
    pub target: CNFDescription,

    //
    //## working buffers, reused across conflicts
    //
    /// the clause under construction during conflict analysis
    pub new_learnt: Vec<Lit>,
    /// antecedent identifiers of the clause under construction
    pub derive_chain: Vec<u64>,
    /// negations of the assumptions responsible for the last failure
    pub conflicts: Vec<Lit>,

    //
    //## learnt cap, adjusted on an adaptive schedule
    //
    pub max_learnt: f64,
    pub(crate) adjust_confl: f64,
    pub(crate) adjust_cnt: usize,

    //
    //## search statistics
    //
    /// EMA of conflicting decision levels
    pub c_lvl: Ema,
    /// EMA of backjump target levels
    pub b_lvl: Ema,

    //
    //## resources
    //
    pub(crate) budget_conflict_base: usize,
    pub(crate) budget_propagation_base: usize,
    start: Instant,
    interrupt: Arc<AtomicBool>,
}

impl Default for State {
    fn default() -> State {
        State {
            config: Config::default(),
            unsat: false,
            target: CNFDescription::default(),
            new_learnt: Vec::new(),
            derive_chain: Vec::new(),
            conflicts: Vec::new(),
            max_learnt: 0.0,
            adjust_confl: 100.0,
            adjust_cnt: 100,
            c_lvl: Ema::new(100),
            b_lvl: Ema::new(100),
            budget_conflict_base: 0,
            budget_propagation_base: 0,
            start: Instant::now(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Instantiate for State {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> State {
        State {
            config: config.clone(),
            target: cnf.clone(),
            adjust_confl: config.learntsize_adjust_start as f64,
            adjust_cnt: config.learntsize_adjust_start,
            ..State::default()
        }
    }
    fn handle(&mut self, e: SolverEvent) {
        if e == SolverEvent::NewVar {
            self.target.num_of_variables += 1;
        }
    }
}

impl StateIF for State {
    fn progress(&self, asg: &AssignStack, cdb: &ClauseDB) {
        log::info!(
            "{:>9} conflicts, {:>9} decisions ({:>7} random), {:>11} propagations, {:>6} restarts, {:>8} clauses ({:>8} learnts, {:>4} reductions), c-lvl {:>6.1}, b-lvl {:>6.1}",
            asg.num_conflict(),
            asg.num_decision(),
            asg.num_rnd_decision(),
            asg.num_propagation(),
            asg.num_restart(),
            cdb.num_clause(),
            cdb.num_learnt(),
            cdb.num_reduction(),
            self.c_lvl.get(),
            self.b_lvl.get(),
        );
    }
    fn reset_budgets(&mut self, asg: &AssignStack) {
        self.budget_conflict_base = asg.num_conflict();
        self.budget_propagation_base = asg.num_propagation();
        self.start = Instant::now();
    }
    fn check_resources(&self, asg: &AssignStack) -> MaybeInconsistent {
        if self.is_interrupted() {
            return Err(SolverError::Interrupted);
        }
        let cb = self.config.conflict_budget;
        if cb != 0 && cb <= asg.num_conflict() - self.budget_conflict_base {
            return Err(SolverError::BudgetExceeded);
        }
        let pb = self.config.propagation_budget;
        if pb != 0 && pb <= asg.num_propagation() - self.budget_propagation_base {
            return Err(SolverError::BudgetExceeded);
        }
        if 0.0 < self.config.time_limit && self.config.time_limit < self.elapsed() {
            return Err(SolverError::TimeOut);
        }
        Ok(())
    }
}

impl State {
    /// a handle observed between propagation batches; storing `true` into it
    /// unwinds the ongoing search to a consistent state. The flag stays set
    /// until the caller clears it.
    pub fn interrupter(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }
    /// seconds since the current solve call started.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
