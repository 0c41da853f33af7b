//! Conflict analysis
use crate::{
    assign::{AssignIF, AssignReason, AssignStack, PropagateIF},
    cdb::{ClauseDB, ClauseDBIF, ClauseIF, ClauseId},
    config::MinimizeMode,
    state::{State, StateIF},
    types::*,
};

/// Resolve a conflict into a learnt clause, backjump, and attach the clause.
///
/// # Errors
///
/// `SolverError::RootLevelConflict` if the derived assertion contradicts the
/// root level, which proves the formula unsatisfiable.
pub(crate) fn handle_conflict(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &mut State,
    ci: ClauseId,
) -> MaybeInconsistent {
    let conflicting_level = asg.decision_level();
    debug_assert!(asg.root_level() < conflicting_level);
    let assign_level = conflict_analyze(asg, cdb, state, ci).max(asg.root_level());
    debug_assert!(!state.new_learnt.is_empty());
    state.c_lvl.update(conflicting_level as f64);
    state.b_lvl.update(assign_level as f64);
    asg.cancel_until(assign_level);
    let l0 = state.new_learnt[0];
    if state.new_learnt.len() == 1 {
        //
        //## a new assertion by unit learnt clause generation
        //
        let uid = cdb.issue_uid();
        cdb.certification
            .push_add(uid, &state.new_learnt, &state.derive_chain);
        asg.assign_at_root_level(l0)?;
    } else {
        let cid = cdb.new_clause(&*asg, &mut state.new_learnt, true);
        cdb.record_derivation(cid, &state.derive_chain);
        cdb.reward_at_analysis(cid);
        debug_assert_eq!(cdb[cid].lit0(), l0);
        debug_assert_eq!(asg.assigned(l0), None);
        asg.assign_by_implication(l0, AssignReason::Implication(cid));
    }
    asg.decay_activity();
    cdb.decay_activity();
    //
    //## report progress on the adaptive schedule
    //
    state.adjust_cnt -= 1;
    if state.adjust_cnt == 0 {
        state.adjust_confl *= state.config.learntsize_adjust_inc;
        state.adjust_cnt = state.adjust_confl as usize;
        state.max_learnt *= state.config.learntsize_inc;
        state.progress(asg, cdb);
        let _ = cdb.check_size()?;
    }
    Ok(())
}

/// Derive the first-UIP clause from a conflict. The result is left in
/// `state.new_learnt` with the asserting literal at position 0 and a literal
/// of the second-highest level at position 1; the return value is that
/// second-highest level, the backjump target.
fn conflict_analyze(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &mut State,
    confl: ClauseId,
) -> DecisionLevel {
    let mut learnt = std::mem::take(&mut state.new_learnt);
    let mut chain = std::mem::take(&mut state.derive_chain);
    learnt.clear();
    chain.clear();
    let dl = asg.decision_level();
    let mut path_cnt = 0;
    let mut cid = confl;
    let mut ti = asg.stack_len() - 1;
    let mut resolved = false;
    let p = loop {
        if cdb[cid].is_learnt() {
            cdb.reward_at_analysis(cid);
        }
        if cdb.certification.is_active() {
            chain.push(cdb[cid].uid());
        }
        // on a reason clause the first literal is the implied one, already
        // resolved upon
        let skip = resolved as usize;
        for k in skip..cdb[cid].len() {
            let q = cdb[cid][k];
            let vi = q.vi();
            let lv = asg.level(vi);
            if !asg.var(vi).is(FlagVar::CA_SEEN) && 0 < lv {
                debug_assert!(asg.assign(vi).is_some());
                asg.reward_at_analysis(vi);
                asg.var_mut(vi).turn_on(FlagVar::CA_SEEN);
                if dl <= lv {
                    path_cnt += 1;
                } else {
                    learnt.push(q);
                }
            }
        }
        // pop the trail backward to the next literal on the conflict paths
        while !asg.var(asg.stack(ti).vi()).is(FlagVar::CA_SEEN) {
            debug_assert!(0 < ti);
            ti -= 1;
        }
        let pl = asg.stack(ti);
        asg.var_mut(pl.vi()).turn_off(FlagVar::CA_SEEN);
        path_cnt -= 1;
        if path_cnt == 0 {
            // the first unique implication point
            break pl;
        }
        match asg.reason(pl.vi()) {
            AssignReason::Implication(r) => cid = r,
            _ => unreachable!("found a path without a reason clause"),
        }
        resolved = true;
        debug_assert!(0 < ti);
        ti -= 1;
    };
    debug_assert!(learnt.iter().all(|l| *l != !p));
    debug_assert_eq!(asg.level(p.vi()), dl);
    learnt.insert(0, !p);
    let bl = minimize(asg, cdb, &mut learnt, &mut chain, state.config.minimize_mode);
    state.new_learnt = learnt;
    state.derive_chain = chain;
    bl
}

/// Shrink a fresh learnt clause, then place a literal of the second-highest
/// level at position 1 and return that level.
fn minimize(
    asg: &mut AssignStack,
    cdb: &ClauseDB,
    learnt: &mut Vec<Lit>,
    chain: &mut Vec<u64>,
    mode: MinimizeMode,
) -> DecisionLevel {
    // vars whose analysis flags must be cleared on the way out
    let mut to_clear: Vec<Lit> = learnt.clone();
    match mode {
        MinimizeMode::Deep => {
            let l0 = learnt[0];
            let mut stack: Vec<(usize, Lit)> = Vec::new();
            learnt.retain(|l| {
                *l == l0
                    || match asg.reason(l.vi()) {
                        AssignReason::Implication(_) => {
                            !lit_redundant(asg, cdb, &mut stack, &mut to_clear, chain, *l)
                        }
                        _ => true,
                    }
            });
        }
        MinimizeMode::Basic => {
            let l0 = learnt[0];
            learnt.retain(|l| {
                if *l == l0 {
                    return true;
                }
                match asg.reason(l.vi()) {
                    AssignReason::Implication(cid) => {
                        let c = &cdb[cid];
                        let keep = c
                            .iter()
                            .skip(1)
                            .any(|q| !asg.var(q.vi()).is(FlagVar::CA_SEEN) && 0 < asg.level(q.vi()));
                        if !keep && cdb.certification.is_active() {
                            chain.push(c.uid());
                        }
                        keep
                    }
                    _ => true,
                }
            });
        }
        MinimizeMode::None => (),
    }
    // find the correct backtrack level from the remaining literals
    let mut level_to_return = 0;
    if 1 < learnt.len() {
        let mut max_i = 1;
        let mut lv = asg.level(learnt[1].vi());
        for (i, l) in learnt.iter().enumerate().skip(2) {
            let l_lv = asg.level(l.vi());
            if lv < l_lv {
                lv = l_lv;
                max_i = i;
            }
        }
        learnt.swap(1, max_i);
        level_to_return = lv;
    }
    for l in &to_clear {
        asg.var_mut(l.vi())
            .turn_off(FlagVar::CA_SEEN | FlagVar::REMOVABLE | FlagVar::MIN_FAILED);
    }
    level_to_return
}

/// Check if a literal's justification is subsumed by the rest of the learnt
/// clause, walking the implication graph with an explicit work stack. The
/// three outcomes per var are memoized across calls within one conflict:
/// removable, failed, or still undetermined.
fn lit_redundant(
    asg: &mut AssignStack,
    cdb: &ClauseDB,
    stack: &mut Vec<(usize, Lit)>,
    to_clear: &mut Vec<Lit>,
    chain: &mut Vec<u64>,
    lit: Lit,
) -> bool {
    let chain_top = chain.len();
    stack.clear();
    let mut p = lit;
    let AssignReason::Implication(mut cid) = asg.reason(p.vi()) else {
        return false;
    };
    if cdb.certification.is_active() {
        chain.push(cdb[cid].uid());
    }
    let mut i = 1;
    loop {
        if i < cdb[cid].len() {
            let q = cdb[cid][i];
            i += 1;
            let vi = q.vi();
            let lv = asg.level(vi);
            // root-level and already-removable literals cost nothing
            if lv == 0
                || asg.var(vi).is(FlagVar::CA_SEEN)
                || asg.var(vi).is(FlagVar::REMOVABLE)
            {
                continue;
            }
            let has_reason = matches!(asg.reason(vi), AssignReason::Implication(_));
            if !has_reason || asg.var(vi).is(FlagVar::MIN_FAILED) {
                // a decision var leaked in; everything on the path fails too
                stack.push((0, p));
                for (_, l) in stack.iter() {
                    let vj = l.vi();
                    if undetermined(asg, vj) {
                        asg.var_mut(vj).turn_on(FlagVar::MIN_FAILED);
                        to_clear.push(*l);
                    }
                }
                chain.truncate(chain_top);
                return false;
            }
            // descend into the parent's reason
            stack.push((i, p));
            p = q;
            let AssignReason::Implication(r) = asg.reason(p.vi()) else {
                unreachable!("checked above");
            };
            cid = r;
            if cdb.certification.is_active() {
                chain.push(cdb[cid].uid());
            }
            i = 1;
        } else {
            // finished with the current literal and its reason
            if undetermined(asg, p.vi()) {
                asg.var_mut(p.vi()).turn_on(FlagVar::REMOVABLE);
                to_clear.push(p);
            }
            let Some((j, q)) = stack.pop() else {
                break;
            };
            i = j;
            p = q;
            let AssignReason::Implication(r) = asg.reason(p.vi()) else {
                unreachable!("only implied literals are stacked");
            };
            cid = r;
        }
    }
    true
}

/// Express the final conflict in terms of the given assumptions: compute the
/// set of assumptions sufficient for falsifying `failed` and leave its
/// negation clause in `state.conflicts`.
pub(crate) fn analyze_final(
    asg: &mut AssignStack,
    cdb: &ClauseDB,
    state: &mut State,
    failed: Lit,
) {
    state.conflicts.clear();
    state.conflicts.push(!failed);
    if asg.decision_level() == asg.root_level() {
        return;
    }
    asg.var_mut(failed.vi()).turn_on(FlagVar::CA_SEEN);
    let bottom = asg.len_upto(asg.root_level());
    for i in (bottom..asg.stack_len()).rev() {
        let l = asg.stack(i);
        let vi = l.vi();
        if !asg.var(vi).is(FlagVar::CA_SEEN) {
            continue;
        }
        match asg.reason(vi) {
            AssignReason::Implication(cid) => {
                for k in 1..cdb[cid].len() {
                    let vj = cdb[cid][k].vi();
                    if 0 < asg.level(vj) {
                        asg.var_mut(vj).turn_on(FlagVar::CA_SEEN);
                    }
                }
            }
            _ => {
                debug_assert!(0 < asg.level(vi));
                state.conflicts.push(!l);
            }
        }
        asg.var_mut(vi).turn_off(FlagVar::CA_SEEN);
    }
    asg.var_mut(failed.vi()).turn_off(FlagVar::CA_SEEN);
}

/// `true` if minimization knows nothing about the var yet.
fn undetermined(asg: &AssignStack, vi: VarId) -> bool {
    let v = asg.var(vi);
    !v.is(FlagVar::CA_SEEN) && !v.is(FlagVar::REMOVABLE) && !v.is(FlagVar::MIN_FAILED)
}
