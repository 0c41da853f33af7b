//! Boolean constraint propagation and backjumping
use {
    super::{AssignIF, AssignReason, AssignStack},
    crate::{
        cdb::{ClauseDB, ClauseIF, ClauseId, Watch},
        config::VarSelection,
        types::*,
    },
};

/// API for Boolean constraint propagation like
/// [`propagate`](`crate::assign::PropagateIF::propagate`),
/// [`assign_by_decision`](`crate::assign::PropagateIF::assign_by_decision`),
/// [`cancel_until`](`crate::assign::PropagateIF::cancel_until`), and so on.
pub trait PropagateIF {
    /// add an assignment at the root level.
    ///
    /// # Errors
    ///
    /// emit `SolverError::RootLevelConflict` if the negation is already
    /// asserted.
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent;
    /// record an implied assignment at the current decision level.
    ///
    /// ## Caveat
    /// Callers have to assure the var is unassigned.
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason);
    /// record a decision, opening a new decision level.
    fn assign_by_decision(&mut self, l: Lit);
    /// execute *backjump*, undoing every assignment above `lv` and saving
    /// phases on the way down.
    fn cancel_until(&mut self, lv: DecisionLevel);
    /// execute *boolean constraint propagation* or *unit propagation*.
    /// Returns the conflicting clause if a conflict was found.
    fn propagate(&mut self, cdb: &mut ClauseDB) -> Option<ClauseId>;
}

/// outcome of inspecting one watched clause
enum Watching {
    /// the other watched literal is true; keep the watch, cache the literal.
    Satisfied(Lit),
    /// a replacement literal was found and swapped into the watch slot.
    Relocated { lit: Lit, blocker: Lit },
    /// no replacement; the clause is unit or conflicting on this literal.
    Unit(Lit),
}

impl PropagateIF for AssignStack {
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent {
        debug_assert!(self.trail_lim.is_empty());
        let vi = l.vi();
        debug_assert!(vi <= self.num_vars);
        match self.assign[vi] {
            None => {
                self.assign[vi] = Some(bool::from(l));
                self.level[vi] = self.root_level;
                self.reason[vi] = AssignReason::None;
                debug_assert!(!self.trail.contains(&!l));
                self.trail.push(l);
                self.num_asserted_vars += 1;
                Ok(())
            }
            Some(x) if x == bool::from(l) => Ok(()),
            _ => Err(SolverError::RootLevelConflict),
        }
    }
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason) {
        let vi = l.vi();
        debug_assert!(vi <= self.num_vars);
        debug_assert!(self.assign[vi].is_none());
        debug_assert!(!self.trail.contains(&l) && !self.trail.contains(&!l));
        self.assign[vi] = Some(bool::from(l));
        self.level[vi] = self.decision_level();
        self.reason[vi] = reason;
        self.trail.push(l);
        if self.decision_level() == self.root_level {
            self.num_asserted_vars += 1;
        }
    }
    fn assign_by_decision(&mut self, l: Lit) {
        let vi = l.vi();
        debug_assert!(vi <= self.num_vars);
        debug_assert!(self.assign[vi].is_none());
        debug_assert!(!self.trail.contains(&l) && !self.trail.contains(&!l));
        self.level_up();
        self.assign[vi] = Some(bool::from(l));
        self.level[vi] = self.decision_level();
        self.reason[vi] = AssignReason::Decision(self.decision_level());
        self.trail.push(l);
        self.num_decision += 1;
    }
    fn cancel_until(&mut self, lv: DecisionLevel) {
        if self.trail_lim.len() as DecisionLevel <= lv {
            return;
        }
        let lim = self.trail_lim[lv as usize];
        for i in lim..self.trail.len() {
            let l = self.trail[i];
            let vi = l.vi();
            debug_assert!(
                self.assign[vi].is_some(),
                "cancel_until found unassigned var {vi} in trail"
            );
            self.saved_phase[vi] = self.assign[vi];
            self.assign[vi] = None;
            self.reason[vi] = AssignReason::None;
            self.var_order.insert(&self.var, vi);
            if self.selection == VarSelection::Recency {
                self.var_queue.update_unassigned(vi);
            }
        }
        self.trail.truncate(lim);
        self.trail_lim.truncate(lv as usize);
        self.q_head = self.trail.len();
        debug_assert!(self.trail.iter().all(|l| self.assign[l.vi()].is_some()));
        debug_assert!(self.trail.iter().all(|k| !self.trail.contains(&!*k)));
    }
    fn propagate(&mut self, cdb: &mut ClauseDB) -> Option<ClauseId> {
        while let Some(p) = self.trail.get(self.q_head).copied() {
            self.q_head += 1;
            self.num_propagation += 1;
            let false_lit = !p;
            let mut watches = cdb.take_watches(p);
            let mut keep: Vec<Watch> = Vec::with_capacity(watches.len());
            let mut conflict: Option<ClauseId> = None;
            let mut i = 0;
            while i < watches.len() {
                let mut w = watches[i];
                i += 1;
                // cheap short-circuit on the cached blocking literal
                if self.assigned(w.blocker) == Some(true) {
                    keep.push(w);
                    continue;
                }
                let next = {
                    let c = cdb.clause_mut(w.c);
                    debug_assert!(!c.is_dead());
                    // make sure the false literal occupies the second slot
                    if c[0] == false_lit {
                        c.swap(0, 1);
                    }
                    debug_assert_eq!(c[1], false_lit);
                    let first = c[0];
                    if first != w.blocker && self.assigned(first) == Some(true) {
                        Watching::Satisfied(first)
                    } else {
                        let mut relocated = None;
                        for k in 2..c.len() {
                            if self.assigned(c[k]) != Some(false) {
                                c.swap(1, k);
                                relocated = Some(c[1]);
                                break;
                            }
                        }
                        match relocated {
                            Some(lit) => Watching::Relocated {
                                lit,
                                blocker: first,
                            },
                            None => Watching::Unit(first),
                        }
                    }
                };
                match next {
                    Watching::Satisfied(first) => {
                        w.blocker = first;
                        keep.push(w);
                    }
                    Watching::Relocated { lit, blocker } => {
                        // the clause stops watching `false_lit`
                        cdb.watch_list_mut(!lit).push(Watch {
                            blocker,
                            c: w.c,
                        });
                    }
                    Watching::Unit(first) => {
                        keep.push(Watch {
                            blocker: first,
                            c: w.c,
                        });
                        match self.assigned(first) {
                            Some(false) => {
                                // conflict; finish compacting this watch list
                                // before bailing out
                                self.num_conflict += 1;
                                keep.extend_from_slice(&watches[i..]);
                                conflict = Some(w.c);
                                break;
                            }
                            None => {
                                self.assign_by_implication(
                                    first,
                                    AssignReason::Implication(w.c),
                                );
                            }
                            Some(true) => {
                                debug_assert!(false, "blocked literal must be caught earlier");
                            }
                        }
                    }
                }
            }
            cdb.put_watches(p, keep);
            if conflict.is_some() {
                self.q_head = self.trail.len();
                return conflict;
            }
        }
        #[cfg(feature = "boundary_check")]
        {
            use crate::cdb::ClauseDBIF;
            for c in cdb.iter().skip(1) {
                assert!(
                    c.is_dead()
                        || c.iter().any(|l| self.assigned(*l) == Some(true))
                        || (self.assigned(c.lit0()).is_none() && self.assigned(c.lit1()).is_none()),
                    "missed propagation on {c}"
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign::VarSelectIF, cdb::ClauseDBIF, config::Config};

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    #[test]
    fn test_assignment_and_backjump() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 3,
            ..CNFDescription::default()
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        assert!(asg.assign_at_root_level(lit(1)).is_ok());
        assert_eq!(asg.trail, vec![lit(1)]);
        assert!(asg.assign_at_root_level(lit(1)).is_ok());
        assert_eq!(asg.trail, vec![lit(1)]);
        assert!(asg.assign_at_root_level(lit(-1)).is_err());
        assert_eq!(asg.decision_level(), 0);

        asg.assign_by_decision(lit(2));
        asg.assign_by_decision(lit(3));
        assert_eq!(asg.decision_level(), 2);
        assert_eq!(asg.stack_len(), 3);
        assert_eq!(asg.len_upto(1), 2);

        asg.cancel_until(1);
        assert_eq!(asg.trail, vec![lit(1), lit(2)]);
        assert_eq!(asg.decision_level(), 1);
        assert_eq!(asg.assigned(lit(2)), Some(true));
        assert_eq!(asg.assigned(lit(-2)), Some(false));
        assert_eq!(asg.assigned(lit(3)), None);
        // the phases of the undone vars were saved
        asg.cancel_until(0);
        assert_eq!(asg.decision_level(), 0);
        let l = asg.select_decision_literal(false);
        assert!(l == Some(lit(2)) || l == Some(lit(3)));
    }

    #[test]
    fn test_unit_propagation() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 3,
            num_of_clauses: 2,
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        // (-1 v 2) and (-2 v 3)
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(2)], false);
        cdb.new_clause(&asg, &mut vec![lit(-2), lit(3)], false);
        asg.assign_by_decision(lit(1));
        assert!(asg.propagate(&mut cdb).is_none());
        assert_eq!(asg.assigned(lit(2)), Some(true));
        assert_eq!(asg.assigned(lit(3)), Some(true));
        assert_eq!(asg.decision_level(), 1);
    }

    #[test]
    fn test_propagation_conflict() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 3,
            num_of_clauses: 3,
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(2)], false);
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(-2)], false);
        asg.assign_by_decision(lit(1));
        let cc = asg.propagate(&mut cdb);
        assert!(cc.is_some());
        assert_eq!(asg.num_conflict(), 1);
    }
}
