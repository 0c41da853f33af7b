/// API for observing an exponential moving average.
pub trait EmaIF {
    /// return the current value.
    fn get(&self) -> f64;
    /// return a ratio of short / long statistics.
    fn trend(&self) -> f64 {
        unimplemented!()
    }
}

/// API for updating an exponential moving average.
pub trait EmaMutIF: EmaIF {
    /// the type of the argument of `update`.
    type Input;
    /// catch up with the current state.
    fn update(&mut self, x: Self::Input);
}

/// Exponential moving average with a single smoothing window.
#[derive(Clone, Debug)]
pub struct Ema {
    val: f64,
    sca: f64,
}

impl EmaIF for Ema {
    fn get(&self) -> f64 {
        self.val
    }
}

impl EmaMutIF for Ema {
    type Input = f64;
    fn update(&mut self, x: Self::Input) {
        self.val = self.sca * x + (1.0 - self.sca) * self.val;
    }
}

impl Ema {
    pub fn new(s: usize) -> Ema {
        Ema {
            val: 0.0,
            sca: 1.0 / (s as f64),
        }
    }
    /// set the initial value.
    pub fn with_value(mut self, x: f64) -> Ema {
        self.val = x;
        self
    }
}

/// A pair of fast and slow EMAs over the same input.
#[derive(Clone, Debug)]
pub struct Ema2 {
    fast: f64,
    slow: f64,
    fe: f64,
    se: f64,
}

impl EmaIF for Ema2 {
    fn get(&self) -> f64 {
        self.fast
    }
    fn trend(&self) -> f64 {
        self.fast / self.slow
    }
}

impl EmaMutIF for Ema2 {
    type Input = f64;
    fn update(&mut self, x: Self::Input) {
        self.fast = self.fe * x + (1.0 - self.fe) * self.fast;
        self.slow = self.se * x + (1.0 - self.se) * self.slow;
    }
}

impl Ema2 {
    pub fn new(f: usize) -> Ema2 {
        Ema2 {
            fast: 0.0,
            slow: 0.0,
            fe: 1.0 / (f as f64),
            se: 1.0 / (f as f64),
        }
    }
    /// set the secondary window size.
    pub fn with_slow(mut self, s: usize) -> Ema2 {
        self.se = 1.0 / (s as f64);
        self
    }
    pub fn get_slow(&self) -> f64 {
        self.slow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_converges() {
        let mut e = Ema::new(4);
        for _ in 0..1000 {
            e.update(10.0);
        }
        assert!((e.get() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn ema2_trend() {
        let mut e = Ema2::new(2).with_slow(100);
        for _ in 0..10 {
            e.update(1.0);
        }
        // the fast window reacts before the slow one
        assert!(1.0 < e.trend());
    }
}
