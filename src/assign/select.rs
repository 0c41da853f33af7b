//! Decision var selection
use {
    super::AssignStack,
    crate::{config::VarSelection, types::*},
    rand::Rng,
};

/// API for var selection like
/// [`select_decision_literal`](`crate::assign::VarSelectIF::select_decision_literal`).
pub trait VarSelectIF {
    /// select a new decision literal, or `None` if every decision-eligible
    /// var is assigned (a model has been found).
    fn select_decision_literal(&mut self, use_target: bool) -> Option<Lit>;
    /// force the polarity of a var from outside; `None` clears the directive.
    fn set_forced_phase(&mut self, vi: VarId, phase: Option<bool>);
    /// capture the current assignment as the target phases and remember its
    /// size as the best seen so far.
    fn save_target_phases(&mut self);
    /// exclude or include a var from branching.
    fn set_decision_var(&mut self, vi: VarId, eligible: bool);
}

impl VarSelectIF for AssignStack {
    fn select_decision_literal(&mut self, use_target: bool) -> Option<Lit> {
        if 0.0 < self.rnd_decision_freq
            && 0 < self.num_vars
            && self.rng.gen::<f64>() < self.rnd_decision_freq
        {
            let vi = self.rng.gen_range(1..=self.num_vars);
            if self.assign[vi].is_none() && self.var[vi].is(FlagVar::DECISION) {
                self.num_rnd_decision += 1;
                let p = self.decide_phase(vi, use_target);
                return Some(Lit::from((vi, p)));
            }
        }
        let vi = match self.selection {
            VarSelection::Activity => self.select_var_by_activity(),
            VarSelection::Recency => self.select_var_by_recency(),
        }?;
        let p = self.decide_phase(vi, use_target);
        Some(Lit::from((vi, p)))
    }
    fn set_forced_phase(&mut self, vi: VarId, phase: Option<bool>) {
        self.forced_phase[vi] = phase;
    }
    fn save_target_phases(&mut self) {
        for l in self.trail.iter() {
            self.target_phase[l.vi()] = self.assign[l.vi()];
        }
        self.best_assign = self.trail.len();
    }
    fn set_decision_var(&mut self, vi: VarId, eligible: bool) {
        self.var[vi].set(FlagVar::DECISION, eligible);
        if eligible && self.assign[vi].is_none() {
            self.var_order.insert(&self.var, vi);
        }
    }
}

impl AssignStack {
    fn select_var_by_activity(&mut self) -> Option<VarId> {
        loop {
            let vi = self.var_order.pop(&self.var)?;
            if self.assign[vi].is_none() && self.var[vi].is(FlagVar::DECISION) {
                return Some(vi);
            }
        }
    }
    fn select_var_by_recency(&mut self) -> Option<VarId> {
        let mut vi = self.var_queue.cursor();
        while vi != 0 && (self.assign[vi].is_some() || !self.var[vi].is(FlagVar::DECISION)) {
            vi = self.var_queue.older(vi);
        }
        if vi == 0 {
            return None;
        }
        self.var_queue.set_cursor(vi);
        Some(vi)
    }
    /// Polarity for a chosen var, resolved by a deterministic fallback
    /// chain: a forced phase overrides everything, then the target phase
    /// while stabilizing, then the saved phase, then the initial default.
    pub(crate) fn decide_phase(&self, vi: VarId, use_target: bool) -> bool {
        let mut phase = self.forced_phase[vi];
        if phase.is_none() && use_target {
            phase = self.target_phase[vi];
        }
        if phase.is_none() {
            phase = self.saved_phase[vi];
        }
        // This final step should not be necessary once a var has been
        // assigned at least once, but the interaction of forced, target and
        // saved phases is subtle enough that we keep it.
        phase.unwrap_or(self.initial_phase)
    }
}

impl ActivityIF<VarId> for AssignStack {
    fn activity(&self, vi: VarId) -> f64 {
        self.var[vi].activity
    }
    fn reward_at_analysis(&mut self, vi: VarId) {
        self.var[vi].activity += self.activity_inc;
        if 1e100 < self.var[vi].activity {
            for v in self.var.iter_mut().skip(1) {
                v.activity *= 1e-100;
            }
            self.activity_inc *= 1e-100;
        }
        self.var_order.update(&self.var, vi);
        if self.selection == VarSelection::Recency {
            self.var_queue.bump(vi);
            if self.assign[vi].is_none() {
                self.var_queue.set_cursor(vi);
            }
        }
    }
    fn decay_activity(&mut self) {
        self.activity_inc /= self.activity_decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign::PropagateIF, config::Config};

    fn build(nv: usize) -> AssignStack {
        AssignStack::instantiate(
            &Config::default(),
            &CNFDescription {
                num_of_variables: nv,
                ..CNFDescription::default()
            },
        )
    }

    #[test]
    fn phase_precedence() {
        let mut asg = build(2);
        // initial default
        assert!(!asg.decide_phase(1, false));
        // saved phase wins over the default
        asg.assign_by_decision(Lit::from(1i32));
        asg.cancel_until(0);
        assert!(asg.decide_phase(1, false));
        // target phase wins over the saved one while stabilizing
        asg.assign_by_decision(Lit::from(-1i32));
        asg.save_target_phases();
        asg.cancel_until(0);
        asg.assign_by_decision(Lit::from(1i32));
        asg.cancel_until(0);
        assert!(asg.decide_phase(1, false));
        assert!(!asg.decide_phase(1, true));
        // a forced phase overrides even the target
        asg.set_forced_phase(1, Some(true));
        assert!(asg.decide_phase(1, true));
        asg.set_forced_phase(1, None);
        assert!(!asg.decide_phase(1, true));
    }

    #[test]
    fn exhausted_selection_means_model() {
        let mut asg = build(2);
        asg.assign_by_decision(Lit::from(1i32));
        asg.assign_by_decision(Lit::from(2i32));
        assert_eq!(asg.select_decision_literal(false), None);
    }

    #[test]
    fn non_decision_vars_are_skipped() {
        let mut asg = build(2);
        asg.set_decision_var(1, false);
        let l = asg.select_decision_literal(false);
        assert_eq!(l.map(|l| l.vi()), Some(2));
    }

    #[test]
    fn recency_selection_walks_the_queue() {
        let mut config = Config::default();
        config.var_selection = VarSelection::Recency;
        let mut asg = AssignStack::instantiate(
            &config,
            &CNFDescription {
                num_of_variables: 3,
                ..CNFDescription::default()
            },
        );
        // the most recently enqueued var comes first
        assert_eq!(asg.select_decision_literal(false).map(|l| l.vi()), Some(3));
        asg.assign_by_decision(Lit::from(-3i32));
        assert_eq!(asg.select_decision_literal(false).map(|l| l.vi()), Some(2));
        // bumping moves a var ahead of the cursor again
        asg.reward_at_analysis(1);
        assert_eq!(asg.select_decision_literal(false).map(|l| l.vi()), Some(1));
    }
}
