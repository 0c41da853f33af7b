/// Flags used in `Var` and `Clause`.
use bitflags::bitflags;

bitflags! {
    /// Misc bit flags used by [`Var`](`crate::assign::Var`).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct FlagVar: u8 {
        /// the var is eligible for branching.
        const DECISION    = 0b0000_0001;
        /// the var is touched by the ongoing conflict analysis.
        const CA_SEEN     = 0b0000_0010;
        /// minimization marked the var's literal removable from a learnt clause.
        const REMOVABLE   = 0b0000_0100;
        /// minimization proved the var's literal is not removable.
        const MIN_FAILED  = 0b0000_1000;
    }

    /// Misc bit flags used by [`Clause`](`crate::cdb::Clause`).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct FlagClause: u8 {
        /// a learnt clause, subject to reduction.
        const LEARNT = 0b0000_0001;
        /// a logically deleted clause, physically retained until collection.
        const DEAD   = 0b0000_0010;
    }
}

/// API for flag manipulation shared by `Var` and `Clause`.
pub trait FlagIF {
    type FlagType;
    /// return true if the flag in on.
    fn is(&self, flag: Self::FlagType) -> bool;
    /// set the flag.
    fn set(&mut self, f: Self::FlagType, b: bool);
    /// toggle the flag off.
    fn turn_off(&mut self, flag: Self::FlagType);
    /// toggle the flag on.
    fn turn_on(&mut self, flag: Self::FlagType);
}
