use rand::prelude::*;

use super::job::ProcessSpec;

/// Parameters for a Bernoulli arrival process with two burst lengths.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliWorkload {
    pub ticks: u64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: i64,
    pub long_burst: i64,
    pub seed: u64,
}

impl Default for BernoulliWorkload {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            seed: 0,
        }
    }
}

impl BernoulliWorkload {
    pub fn generate(&self) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut specs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };

                specs.push(ProcessSpec::new(specs.len() as u64 + 1, t as i64, burst));
            }
        }

        specs
    }
}

/// The four-process demo workload.
pub fn demo_specs() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new(1, 0, 6),
        ProcessSpec::new(2, 2, 4),
        ProcessSpec::new(3, 4, 2),
        ProcessSpec::new(4, 6, 3),
    ]
}
