//! Pre-search probes for trivially satisfying assignments.
//!
//! Some formulas are satisfied by setting every variable to the same value,
//! or by sweeping the variables in index order and propagating, or by a
//! Horn-style pass over the clauses. These cheap patterns are tried before
//! committing to full CDCL search; each one is abandoned on its first failed
//! propagation after rolling the trail back to the root level.
use crate::{
    assign::{AssignIF, AssignStack, PropagateIF},
    cdb::{ClauseDB, ClauseDBIF, ClauseIF, ClauseId},
    state::State,
    types::*,
};

/// Try the probe battery in order. On `Ok(true)` the trail holds a full
/// satisfying assignment; the caller extracts the model before unwinding.
///
/// # Errors
///
/// `SolverError::Interrupted` aborts the whole battery; the trail is rolled
/// back first.
pub(crate) fn lucky_phases(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    debug_assert_eq!(asg.decision_level(), asg.root_level());
    if trivially_false_satisfiable(asg, cdb, state)?
        || trivially_true_satisfiable(asg, cdb, state)?
        || forward_true_satisfiable(asg, cdb, state)?
        || forward_false_satisfiable(asg, cdb, state)?
        || backward_false_satisfiable(asg, cdb, state)?
        || backward_true_satisfiable(asg, cdb, state)?
        || horn_satisfiable(asg, cdb, state, true)?
        || horn_satisfiable(asg, cdb, state, false)?
    {
        debug_assert_eq!(asg.stack_len(), asg.num_vars);
        return Ok(true);
    }
    Ok(false)
}

/// roll back a failed probe.
fn unlucky(asg: &mut AssignStack) {
    let root = asg.root_level();
    asg.cancel_until(root);
}

fn check_interrupt(asg: &mut AssignStack, state: &State) -> MaybeInconsistent {
    if state.is_interrupted() {
        unlucky(asg);
        return Err(SolverError::Interrupted);
    }
    Ok(())
}

/// every clause must contain a literal of the wanted polarity or be
/// satisfied already.
fn all_clauses_have_polarity(asg: &AssignStack, cdb: &ClauseDB, positive: bool) -> bool {
    for c in cdb.iter().skip(1) {
        if c.is_dead() || c.is_learnt() {
            continue;
        }
        let mut ok = false;
        for l in c.iter() {
            match asg.assigned(*l) {
                Some(true) => {
                    ok = true;
                    break;
                }
                Some(false) => continue,
                None if l.as_bool() == positive => {
                    ok = true;
                    break;
                }
                None => continue,
            }
        }
        if !ok {
            return false;
        }
    }
    true
}

/// assign every unassigned var to `phase` in index order, propagating each.
fn sweep_vars<I>(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
    order: I,
    phase: bool,
) -> Result<bool, SolverError>
where
    I: Iterator<Item = VarId>,
{
    for vi in order {
        if vi & 0xff == 0 {
            check_interrupt(asg, state)?;
        }
        if asg.assign(vi).is_some() {
            continue;
        }
        asg.assign_by_decision(Lit::from((vi, phase)));
        if asg.propagate(cdb).is_some() {
            unlucky(asg);
            return Ok(false);
        }
    }
    Ok(true)
}

fn trivially_false_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    check_interrupt(asg, state)?;
    if !all_clauses_have_polarity(asg, cdb, false) {
        return Ok(false);
    }
    sweep_vars(asg, cdb, state, 1..=asg.num_vars, false)
}

fn trivially_true_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    check_interrupt(asg, state)?;
    if !all_clauses_have_polarity(asg, cdb, true) {
        return Ok(false);
    }
    sweep_vars(asg, cdb, state, 1..=asg.num_vars, true)
}

fn forward_true_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    check_interrupt(asg, state)?;
    sweep_vars(asg, cdb, state, 1..=asg.num_vars, true)
}

fn forward_false_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    check_interrupt(asg, state)?;
    sweep_vars(asg, cdb, state, 1..=asg.num_vars, false)
}

fn backward_false_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    check_interrupt(asg, state)?;
    sweep_vars(asg, cdb, state, (1..=asg.num_vars).rev(), false)
}

fn backward_true_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
) -> Result<bool, SolverError> {
    check_interrupt(asg, state)?;
    sweep_vars(asg, cdb, state, (1..=asg.num_vars).rev(), true)
}

/// Go over all clauses and satisfy each by its first unassigned literal of
/// the wanted polarity, then mop up the remaining vars with the opposite
/// phase. With `positive` this accepts (a superset of) satisfiable positive
/// Horn formulas.
fn horn_satisfiable(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &State,
    positive: bool,
) -> Result<bool, SolverError> {
    for i in 1..cdb.len() {
        if i & 0xff == 0 {
            check_interrupt(asg, state)?;
        }
        let picked = {
            let c = &cdb[ClauseId::from(i)];
            if c.is_dead() || c.is_learnt() {
                continue;
            }
            let mut satisfied = false;
            let mut cand: Option<Lit> = None;
            for l in c.iter() {
                match asg.assigned(*l) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => continue,
                    None if l.as_bool() == positive => {
                        cand = Some(*l);
                        break;
                    }
                    None => continue,
                }
            }
            if satisfied {
                continue;
            }
            match cand {
                None => {
                    // a clause with no literal of the wanted polarity
                    unlucky(asg);
                    return Ok(false);
                }
                Some(l) => l,
            }
        };
        asg.assign_by_decision(picked);
        if asg.propagate(cdb).is_some() {
            unlucky(asg);
            return Ok(false);
        }
    }
    sweep_vars(asg, cdb, state, 1..=asg.num_vars, !positive)
}
