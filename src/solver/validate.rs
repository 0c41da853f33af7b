//! Assignment validation
use {
    super::Solver,
    crate::{
        assign::AssignIF,
        cdb::{ClauseDBIF, ClauseIF},
    },
};

/// API for assignment validation.
pub trait ValidateIF {
    /// return a clause falsified by the current assignment, or `None` if
    /// every live clause holds.
    fn validate(&self) -> Option<Vec<i32>>;
}

impl ValidateIF for Solver {
    fn validate(&self) -> Option<Vec<i32>> {
        for c in self.cdb.iter().skip(1) {
            if c.is_dead() {
                continue;
            }
            if !c.iter().any(|l| self.asg.assigned(*l) == Some(true)) {
                return Some(c.into());
            }
        }
        None
    }
}
