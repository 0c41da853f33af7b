//! Restart scheduling
use crate::types::*;

/// API for restart scheduling like
/// [`next_round`](`crate::solver::RestartIF::next_round`).
pub trait RestartIF {
    /// return the conflict budget of the next search round and advance the
    /// schedule.
    fn next_round(&mut self) -> usize;
    /// return `true` while the schedule is in a stabilization episode, in
    /// which decisions follow target phases.
    fn stabilizing(&self) -> bool;
}

/// Restart interval generator. The interval either follows the Luby
/// sequence scaled by `step`, or grows geometrically; episodes of
/// stabilization alternate with doubling lengths on top of either schedule.
#[derive(Clone, Debug)]
pub struct RestartManager {
    luby: LubySeries,
    use_luby: bool,
    /// conflicts per Luby unit, or the first geometric interval
    step: usize,
    /// growth factor of geometric intervals
    inc: f64,
    /// the number of rounds issued so far
    rounds: usize,
    stabilizing: bool,
    /// round count at which stabilization flips next
    stab_limit: usize,
}

impl Default for RestartManager {
    fn default() -> Self {
        RestartManager {
            luby: LubySeries::default(),
            use_luby: true,
            step: 100,
            inc: 2.0,
            rounds: 0,
            stabilizing: false,
            stab_limit: 2,
        }
    }
}

impl Instantiate for RestartManager {
    fn instantiate(config: &Config, _cnf: &CNFDescription) -> Self {
        RestartManager {
            use_luby: config.luby_restart,
            step: config.restart_step.max(1),
            inc: config.restart_inc,
            ..RestartManager::default()
        }
    }
}

impl RestartIF for RestartManager {
    fn next_round(&mut self) -> usize {
        let interval = if self.use_luby {
            self.luby.next_unchecked() * self.step
        } else {
            (self.step as f64 * self.inc.powi(self.rounds as i32)) as usize
        };
        self.rounds += 1;
        if self.stab_limit <= self.rounds {
            self.stabilizing = !self.stabilizing;
            self.stab_limit *= 2;
        }
        interval
    }
    fn stabilizing(&self) -> bool {
        self.stabilizing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luby_schedule_scales_by_step() {
        let config = Config {
            restart_step: 10,
            ..Config::default()
        };
        let mut rst = RestartManager::instantiate(&config, &CNFDescription::default());
        assert_eq!(rst.next_round(), 10);
        assert_eq!(rst.next_round(), 20);
        assert_eq!(rst.next_round(), 10);
    }

    #[test]
    fn geometric_schedule_grows() {
        let config = Config {
            luby_restart: false,
            restart_step: 100,
            restart_inc: 2.0,
            ..Config::default()
        };
        let mut rst = RestartManager::instantiate(&config, &CNFDescription::default());
        assert_eq!(rst.next_round(), 100);
        assert_eq!(rst.next_round(), 200);
        assert_eq!(rst.next_round(), 400);
    }

    #[test]
    fn stabilization_episodes_double() {
        let mut rst = RestartManager::default();
        let mut flips = Vec::new();
        let mut last = rst.stabilizing();
        for i in 0..32 {
            let _ = rst.next_round();
            if rst.stabilizing() != last {
                last = rst.stabilizing();
                flips.push(i);
            }
        }
        assert_eq!(flips, vec![1, 3, 7, 15, 31]);
    }
}
