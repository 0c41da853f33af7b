//! main struct AssignStack
use {
    super::{heap::VarIdHeap, queue::VarQueue, AssignIF, AssignReason, Var},
    crate::{
        config::VarSelection,
        types::*,
    },
    rand::{rngs::SmallRng, SeedableRng},
    std::{fmt, ops::Range, slice::Iter},
};

/// A record of assignments, called 'trail' in Glucose. It also owns every
/// per-variable vector and the branching order structures.
#[derive(Clone, Debug)]
pub struct AssignStack {
    /// record of assignment
    pub(super) trail: Vec<Lit>,
    pub(super) trail_lim: Vec<usize>,
    /// the-number-of-assigned-and-propagated-vars
    pub(super) q_head: usize,
    pub root_level: DecisionLevel,

    //
    //## var state, indexed by VarId
    //
    pub(super) assign: Vec<Option<bool>>,
    pub(super) level: Vec<DecisionLevel>,
    pub(super) reason: Vec<AssignReason>,
    pub(super) var: Vec<Var>,
    pub(super) saved_phase: Vec<Option<bool>>,
    pub(super) target_phase: Vec<Option<bool>>,
    pub(super) forced_phase: Vec<Option<bool>>,

    //
    //## branching order
    //
    pub(super) var_order: VarIdHeap,
    pub(super) var_queue: VarQueue,
    pub(super) selection: VarSelection,
    pub(super) rng: SmallRng,
    pub(super) rnd_decision_freq: f64,
    pub(super) initial_phase: bool,
    /// the largest number of assigned vars seen so far; target phases are
    /// captured when it grows during stabilization
    pub(super) best_assign: usize,

    //
    //## activity
    //
    pub(super) activity_inc: f64,
    pub(super) activity_decay: f64,

    //
    //## statistics
    //
    /// the number of vars.
    pub num_vars: usize,
    pub(super) num_asserted_vars: usize,
    pub(super) num_decision: usize,
    pub(super) num_rnd_decision: usize,
    pub(super) num_propagation: usize,
    pub(super) num_conflict: usize,
    pub(super) num_restart: usize,
}

impl Default for AssignStack {
    fn default() -> AssignStack {
        AssignStack {
            trail: Vec::new(),
            trail_lim: Vec::new(),
            q_head: 0,
            root_level: 0,
            assign: vec![None],
            level: vec![0],
            reason: vec![AssignReason::None],
            var: Var::new_vars(0),
            saved_phase: vec![None],
            target_phase: vec![None],
            forced_phase: vec![None],
            var_order: VarIdHeap::new(0),
            var_queue: VarQueue::new(0),
            selection: VarSelection::default(),
            rng: SmallRng::seed_from_u64(0),
            rnd_decision_freq: 0.0,
            initial_phase: false,
            best_assign: 0,
            activity_inc: 1.0,
            activity_decay: 0.95,
            num_vars: 0,
            num_asserted_vars: 0,
            num_decision: 0,
            num_rnd_decision: 0,
            num_propagation: 0,
            num_conflict: 0,
            num_restart: 0,
        }
    }
}

impl Instantiate for AssignStack {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> AssignStack {
        let nv = cnf.num_of_variables;
        AssignStack {
            trail: Vec::with_capacity(nv),
            assign: vec![None; nv + 1],
            level: vec![0; nv + 1],
            reason: vec![AssignReason::None; nv + 1],
            var: Var::new_vars(nv),
            saved_phase: vec![None; nv + 1],
            target_phase: vec![None; nv + 1],
            forced_phase: vec![None; nv + 1],
            var_order: VarIdHeap::new(nv),
            var_queue: VarQueue::new(nv),
            selection: config.var_selection,
            rng: SmallRng::seed_from_u64(config.rnd_seed),
            rnd_decision_freq: config.rnd_decision_freq,
            initial_phase: config.initial_phase,
            activity_decay: config.var_activity_decay,
            num_vars: nv,
            ..AssignStack::default()
        }
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                self.num_vars += 1;
                self.assign.push(None);
                self.level.push(0);
                self.reason.push(AssignReason::None);
                self.var.push(Var::default());
                self.saved_phase.push(None);
                self.target_phase.push(None);
                self.forced_phase.push(None);
                self.var_order.expand();
                self.var_order.insert(&self.var, self.num_vars);
                self.var_queue.expand();
            }
            SolverEvent::Restart => {
                self.num_restart += 1;
            }
        }
    }
}

impl AssignIF for AssignStack {
    fn root_level(&self) -> DecisionLevel {
        self.root_level
    }
    fn assign(&self, vi: VarId) -> Option<bool> {
        self.assign[vi]
    }
    fn assigned(&self, l: Lit) -> Option<bool> {
        match self.assign[l.vi()] {
            Some(x) if !bool::from(l) => Some(!x),
            x => x,
        }
    }
    fn level(&self, vi: VarId) -> DecisionLevel {
        self.level[vi]
    }
    fn level_ref(&self) -> &[DecisionLevel] {
        &self.level
    }
    fn reason(&self, vi: VarId) -> AssignReason {
        self.reason[vi]
    }
    fn stack(&self, i: usize) -> Lit {
        self.trail[i]
    }
    fn stack_range(&self, r: Range<usize>) -> &[Lit] {
        &self.trail[r]
    }
    fn stack_len(&self) -> usize {
        self.trail.len()
    }
    fn len_upto(&self, n: DecisionLevel) -> usize {
        self.trail_lim.get(n as usize).map_or(0, |n| *n)
    }
    fn stack_iter(&self) -> Iter<'_, Lit> {
        self.trail.iter()
    }
    fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len() as DecisionLevel
    }
    fn remains(&self) -> bool {
        self.q_head < self.trail.len()
    }
    fn level_up(&mut self) {
        self.trail_lim.push(self.trail.len());
    }
    fn satisfies(&self, vec: &[Lit]) -> bool {
        vec.iter().any(|l| self.assigned(*l) == Some(true))
    }
}

impl AssignStack {
    /// return a reference to the var.
    #[inline]
    pub fn var(&self, vi: VarId) -> &Var {
        &self.var[vi]
    }
    /// return a mutable reference to the var.
    #[inline]
    pub fn var_mut(&mut self, vi: VarId) -> &mut Var {
        &mut self.var[vi]
    }
    /// the number of conflicts found so far.
    pub fn num_conflict(&self) -> usize {
        self.num_conflict
    }
    /// the number of branching decisions made so far.
    pub fn num_decision(&self) -> usize {
        self.num_decision
    }
    /// the number of random branching decisions made so far.
    pub fn num_rnd_decision(&self) -> usize {
        self.num_rnd_decision
    }
    /// the number of propagated literals so far.
    pub fn num_propagation(&self) -> usize {
        self.num_propagation
    }
    /// the number of restarts executed so far.
    pub fn num_restart(&self) -> usize {
        self.num_restart
    }
    /// the number of vars asserted at the root level.
    pub fn num_asserted_vars(&self) -> usize {
        self.num_asserted_vars
    }
    /// the number of assigned vars in the best assignment seen so far.
    pub fn best_assign_len(&self) -> usize {
        self.best_assign
    }
    /// build the full model after a successful search.
    pub fn extract_model(&self) -> Vec<i32> {
        (1..=self.num_vars)
            .map(|vi| match self.assign[vi] {
                Some(true) => vi as i32,
                _ => -(vi as i32),
            })
            .collect::<Vec<i32>>()
    }
}

impl fmt::Display for AssignStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.trail.iter().map(|l| i32::from(*l)).collect::<Vec<_>>();
        write!(
            f,
            "ASG:: trail({}):{:?}\n      level: {}, asserted: {}",
            self.trail.len(),
            v,
            self.decision_level(),
            self.num_asserted_vars,
        )
    }
}
