//! Clause structure
use {
    super::ClauseIF,
    crate::types::*,
    std::{
        fmt,
        ops::{Index, IndexMut},
        slice::Iter,
    },
};

/// A representation of 'clause'
#[derive(Clone, Debug, Default)]
pub struct Clause {
    /// the literals; the first two are the watched pair
    pub(super) lits: Vec<Lit>,
    /// a static clause evaluation criterion like LBD
    pub rank: u16,
    /// a dynamic clause evaluation criterion, bumped at conflict analysis
    pub(super) reward: f64,
    /// stable identifier reported to the proof writer
    pub(super) uid: u64,
    /// flags
    pub(super) flags: FlagClause,
}

impl ClauseIF for Clause {
    fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
    fn len(&self) -> usize {
        self.lits.len()
    }
    fn lit0(&self) -> Lit {
        self.lits[0]
    }
    fn lit1(&self) -> Lit {
        self.lits[1]
    }
    fn contains(&self, lit: Lit) -> bool {
        self.lits.contains(&lit)
    }
    fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }
    fn is_dead(&self) -> bool {
        self.is(FlagClause::DEAD)
    }
    fn is_learnt(&self) -> bool {
        self.is(FlagClause::LEARNT)
    }
}

impl Clause {
    /// swap two literal positions; watch registration must follow suit.
    #[inline]
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.lits.swap(i, j);
    }
    /// the stable identifier used in certification records.
    pub fn uid(&self) -> u64 {
        self.uid
    }
    /// the clause activity.
    pub fn activity(&self) -> f64 {
        self.reward
    }
}

impl Index<usize> for Clause {
    type Output = Lit;
    #[inline]
    fn index(&self, i: usize) -> &Lit {
        &self.lits[i]
    }
}

impl IndexMut<usize> for Clause {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Lit {
        &mut self.lits[i]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;
    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl From<&Clause> for Vec<i32> {
    fn from(c: &Clause) -> Vec<i32> {
        c.lits.iter().map(i32::from).collect::<Vec<i32>>()
    }
}

impl FlagIF for Clause {
    type FlagType = FlagClause;
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

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let st = |flag, mes| if self.is(flag) { mes } else { "" };
        write!(
            f,
            "C{{{:?}{}{}}}",
            i32s(&self.lits),
            st(FlagClause::LEARNT, ", learnt"),
            st(FlagClause::DEAD, ", dead"),
        )
    }
}
