//! Conflict-driven clause-learning search engine
use {
    super::{
        conflict::{analyze_final, handle_conflict},
        lucky::lucky_phases,
        restart::{RestartIF, RestartManager},
        Certificate, Solver, SolverEvent, SolverResult,
    },
    crate::{
        assign::{AssignIF, AssignStack, PropagateIF, VarSelectIF},
        cdb::{ClauseDB, ClauseDBIF, ClauseIF},
        state::{State, StateIF},
        types::*,
    },
    std::sync::{atomic::AtomicBool, Arc},
};

/// API for SAT solving like `solve` and `solve_with_assumptions`.
pub trait SolveIF {
    /// search an assignment.
    ///
    /// # Errors
    ///
    /// `SolverError::OutOfMemory`, a budget error, or
    /// `SolverError::Interrupted`. The solver stays consistent after any of
    /// them; call `solve` again with a fresh budget to resume.
    fn solve(&mut self) -> SolverResult;
    /// search an assignment under the given assumption literals. On
    /// `Certificate::UNSAT` the responsible subset of the assumptions is
    /// available through
    /// [`failed_assumptions`](`crate::solver::SolveIF::failed_assumptions`).
    fn solve_with_assumptions(&mut self, assumptions: &[i32]) -> SolverResult;
    /// return a handle for asynchronous cancellation; storing `true` makes
    /// the ongoing `solve` unwind and return `SolverError::Interrupted`.
    fn interrupter(&self) -> Arc<AtomicBool>;
    /// the subset of the last `solve_with_assumptions` call's assumptions
    /// that is itself unsatisfiable against the formula.
    fn failed_assumptions(&self) -> Vec<i32>;
}

impl SolveIF for Solver {
    /// # Examples
    ///
    /// ```
    /// use satyr::*;
    ///
    /// let mut s = Solver::try_from((Config::default(), vec![vec![1i32, 2]].as_ref()))
    ///     .expect("failed to load");
    /// let res = s.solve();
    /// assert!(matches!(res, Ok(Certificate::SAT(_))));
    /// ```
    fn solve(&mut self) -> SolverResult {
        self.solve_with_assumptions(&[])
    }
    fn solve_with_assumptions(&mut self, assumptions: &[i32]) -> SolverResult {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rst,
            ref mut state,
        } = self;
        state.conflicts.clear();
        if state.unsat {
            return Ok(Certificate::UNSAT);
        }
        cdb.check_size()?;
        let mut assumed: Vec<Lit> = Vec::with_capacity(assumptions.len());
        for x in assumptions {
            if *x == 0 || asg.num_vars < x.unsigned_abs() as usize {
                return Err(SolverError::OutOfRange);
            }
            assumed.push(Lit::from(*x));
        }
        state.reset_budgets(asg);
        debug_assert_eq!(asg.decision_level(), asg.root_level);
        // settle pending root-level units left by clause loading
        if asg.propagate(cdb).is_some() {
            state.unsat = true;
            return Ok(Certificate::UNSAT);
        }
        if state.config.use_lucky_phases && assumed.is_empty() {
            match lucky_phases(asg, cdb, state) {
                Ok(true) => {
                    log::debug!("lucky phases found a model");
                    let model = asg.extract_model();
                    asg.cancel_until(asg.root_level);
                    return Ok(Certificate::SAT(model));
                }
                Ok(false) => (),
                Err(e) => {
                    asg.cancel_until(asg.root_level);
                    return Err(e);
                }
            }
        }
        state.max_learnt =
            (cdb.num_clause() as f64 * state.config.learntsize_factor).max(128.0);
        state.adjust_confl = (state.config.learntsize_adjust_start as f64).max(1.0);
        state.adjust_cnt = state.config.learntsize_adjust_start.max(1);
        let answer = search(asg, cdb, rst, state, &assumed);
        match answer {
            Ok(true) => {
                // a dishonest model here means the engine is broken
                for c in cdb.iter().skip(1) {
                    if !c.is_dead() && c.iter().all(|l| asg.assigned(*l) != Some(true)) {
                        asg.cancel_until(asg.root_level);
                        return Err(SolverError::SolverBug);
                    }
                }
                let model = asg.extract_model();
                asg.cancel_until(asg.root_level);
                Ok(Certificate::SAT(model))
            }
            Ok(false) => {
                asg.cancel_until(asg.root_level);
                Ok(Certificate::UNSAT)
            }
            Err(e) => {
                asg.cancel_until(asg.root_level);
                Err(e)
            }
        }
    }
    fn interrupter(&self) -> Arc<AtomicBool> {
        self.state.interrupter()
    }
    fn failed_assumptions(&self) -> Vec<i32> {
        self.state
            .conflicts
            .iter()
            .map(|l| i32::from(!*l))
            .collect::<Vec<i32>>()
    }
}

/// main loop; returns `Ok(true)` for SAT, `Ok(false)` for UNSAT.
fn search(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    rst: &mut RestartManager,
    state: &mut State,
    assumptions: &[Lit],
) -> Result<bool, SolverError> {
    loop {
        let budget = rst.next_round();
        if let Some(sat) = search_round(asg, cdb, rst, state, assumptions, budget)? {
            return Ok(sat);
        }
    }
}

/// one restart round with the given conflict budget. `Ok(None)` asks the
/// caller to start another round with the next schedule step.
fn search_round(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    rst: &mut RestartManager,
    state: &mut State,
    assumptions: &[Lit],
    nof_conflicts: usize,
) -> Result<Option<bool>, SolverError> {
    let base = asg.num_conflict();
    let use_target = state.config.use_target_phase && rst.stabilizing();
    loop {
        if let Err(e) = state.check_resources(asg) {
            asg.cancel_until(asg.root_level);
            return Err(e);
        }
        if let Some(cc) = asg.propagate(cdb) {
            if asg.decision_level() == asg.root_level {
                return Ok(Some(false));
            }
            match handle_conflict(asg, cdb, state, cc) {
                Ok(()) => (),
                Err(SolverError::RootLevelConflict) => return Ok(Some(false)),
                Err(e) => return Err(e),
            }
            continue;
        }
        // no conflict
        if use_target && asg.best_assign_len() < asg.stack_len() {
            asg.save_target_phases();
        }
        if nof_conflicts != 0 && nof_conflicts <= asg.num_conflict() - base {
            asg.cancel_until(asg.root_level);
            asg.handle(SolverEvent::Restart);
            return Ok(None);
        }
        if state.config.use_reduce && state.max_learnt as usize <= cdb.num_learnt() {
            let n = cdb.reduce(&*asg);
            log::debug!("reduction {} removed {n} clauses", cdb.num_reduction());
        }
        // obey pending assumptions before branching freely
        let mut next_decision: Option<Lit> = None;
        while (asg.decision_level() as usize) < assumptions.len() {
            let p = assumptions[asg.decision_level() as usize];
            match asg.assigned(p) {
                Some(true) => {
                    // already satisfied; a pseudo decision level
                    asg.level_up();
                }
                Some(false) => {
                    analyze_final(asg, cdb, state, p);
                    return Ok(Some(false));
                }
                None => {
                    next_decision = Some(p);
                    break;
                }
            }
        }
        if let Some(p) = next_decision {
            asg.assign_by_decision(p);
        } else if let Some(l) = asg.select_decision_literal(use_target) {
            asg.assign_by_decision(l);
        } else {
            // every decision var is assigned without conflict
            return Ok(Some(true));
        }
    }
}
