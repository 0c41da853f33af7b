//! Var struct and its management API
use {
    crate::types::{FlagIF, FlagVar},
    std::fmt,
};

/// Object representing a variable. Assignment value, decision level, reason
/// and phases live in parallel vectors owned by
/// [`AssignStack`](`crate::assign::AssignStack`).
#[derive(Clone, Debug)]
pub struct Var {
    /// the `Flag`s
    pub(crate) flags: FlagVar,
    /// a dynamic evaluation criterion like EVSIDS.
    pub(crate) activity: f64,
}

impl Default for Var {
    fn default() -> Var {
        Var {
            flags: FlagVar::DECISION,
            activity: 0.0,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let st = |flag, mes| if self.is(flag) { mes } else { "" };
        write!(f, "V{{{}}}", st(FlagVar::DECISION, "decision"))
    }
}

impl Var {
    /// return a new vector of `n + 1` `Var`s; slot 0 is never used.
    pub fn new_vars(n: usize) -> Vec<Var> {
        vec![Var::default(); n + 1]
    }
    pub fn activity(&self) -> f64 {
        self.activity
    }
}

impl FlagIF for Var {
    type FlagType = FlagVar;
    #[inline]
    fn is(&self, flag: Self::FlagType) -> bool {
        self.flags.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: Self::FlagType, b: bool) {
        self.flags.set(f, b);
    }
    #[inline]
    fn turn_off(&mut self, flag: Self::FlagType) {
        self.flags.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: Self::FlagType) {
        self.flags.insert(flag);
    }
}
