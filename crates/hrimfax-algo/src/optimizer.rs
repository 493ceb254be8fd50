//! Optimizer interface and the stock SPSA implementation.
//!
//! The driver treats the optimizer as a fully external collaborator: it
//! asks for a point, reports the objective value, and asks whether to
//! stop. Termination policy lives entirely inside the optimizer — the
//! algorithm wrappers impose no iteration budget of their own.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Minimal ask/tell interface for derivative-free minimizers.
///
/// Call sequence: `propose()` → evaluate → `accept(value)`, repeated
/// until `is_done()`. One `accept` per `propose`.
pub trait Optimizer: Send {
    /// The next parameter vector to evaluate.
    fn propose(&mut self) -> Vec<f64>;

    /// Report the objective value for the last proposed point.
    fn accept(&mut self, value: f64);

    /// True once the optimizer's internal policy says to stop.
    fn is_done(&self) -> bool;

    /// The best (point, value) pair observed so far.
    fn best(&self) -> (Vec<f64>, f64);

    /// Number of objective evaluations consumed.
    fn evaluations(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ProposePlus,
    AwaitPlus,
    ProposeMinus,
    AwaitMinus,
}

/// Simultaneous Perturbation Stochastic Approximation.
///
/// Each step draws a random ±1 perturbation direction, probes the
/// objective at θ + cₖΔ and θ − cₖΔ (two evaluations), and moves θ along
/// the estimated gradient. Terminates after a fixed evaluation budget.
pub struct Spsa {
    theta: Vec<f64>,
    step: usize,
    evals: usize,
    max_evals: usize,
    a: f64,
    c: f64,
    alpha: f64,
    gamma: f64,
    stability: f64,
    rng: StdRng,
    phase: Phase,
    delta: Vec<f64>,
    ck: f64,
    f_plus: f64,
    last_point: Vec<f64>,
    best_point: Vec<f64>,
    best_value: f64,
}

impl Spsa {
    /// Create an SPSA minimizer starting at `initial` with a fixed
    /// evaluation budget.
    pub fn new(initial: Vec<f64>, max_evals: usize) -> Self {
        let dim = initial.len();
        // Standard guidance: A ≈ 10% of the expected iteration count.
        let stability = (max_evals as f64 / 2.0) * 0.1;
        Self {
            last_point: initial.clone(),
            best_point: initial.clone(),
            theta: initial,
            step: 0,
            evals: 0,
            max_evals,
            a: 0.2,
            c: 0.1,
            alpha: 0.602,
            gamma: 0.101,
            stability,
            rng: StdRng::from_entropy(),
            phase: Phase::ProposePlus,
            delta: vec![1.0; dim],
            ck: 0.0,
            f_plus: 0.0,
            best_value: f64::INFINITY,
        }
    }

    /// Fix the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Override the gain constants (a: step size, c: perturbation size).
    pub fn with_gains(mut self, a: f64, c: f64) -> Self {
        self.a = a;
        self.c = c;
        self
    }
}

impl Optimizer for Spsa {
    fn propose(&mut self) -> Vec<f64> {
        match self.phase {
            Phase::ProposePlus => {
                for d in &mut self.delta {
                    *d = if self.rng.r#gen::<bool>() { 1.0 } else { -1.0 };
                }
                self.ck = self.c / ((self.step + 1) as f64).powf(self.gamma);
                self.last_point = self
                    .theta
                    .iter()
                    .zip(&self.delta)
                    .map(|(t, d)| t + self.ck * d)
                    .collect();
                self.phase = Phase::AwaitPlus;
            }
            Phase::ProposeMinus => {
                self.last_point = self
                    .theta
                    .iter()
                    .zip(&self.delta)
                    .map(|(t, d)| t - self.ck * d)
                    .collect();
                self.phase = Phase::AwaitMinus;
            }
            // propose() called again before accept(): re-issue the point.
            Phase::AwaitPlus | Phase::AwaitMinus => {}
        }
        self.last_point.clone()
    }

    fn accept(&mut self, value: f64) {
        self.evals += 1;
        if value < self.best_value {
            self.best_value = value;
            self.best_point = self.last_point.clone();
        }
        match self.phase {
            Phase::AwaitPlus => {
                self.f_plus = value;
                self.phase = Phase::ProposeMinus;
            }
            Phase::AwaitMinus => {
                let ak = self.a / ((self.step + 1) as f64 + self.stability).powf(self.alpha);
                let diff = self.f_plus - value;
                for (t, d) in self.theta.iter_mut().zip(&self.delta) {
                    // 1/dᵢ == dᵢ for ±1 perturbations.
                    *t -= ak * diff / (2.0 * self.ck) * d;
                }
                self.step += 1;
                self.phase = Phase::ProposePlus;
            }
            Phase::ProposePlus | Phase::ProposeMinus => {}
        }
    }

    fn is_done(&self) -> bool {
        self.evals >= self.max_evals
    }

    fn best(&self) -> (Vec<f64>, f64) {
        (self.best_point.clone(), self.best_value)
    }

    fn evaluations(&self) -> usize {
        self.evals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic(x: &[f64]) -> f64 {
        x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum()
    }

    #[test]
    fn test_budget_terminates() {
        let mut opt = Spsa::new(vec![0.0], 10).with_seed(7);
        let mut evals = 0;
        while !opt.is_done() {
            let point = opt.propose();
            opt.accept(quadratic(&point));
            evals += 1;
        }
        assert_eq!(evals, 10);
        assert_eq!(opt.evaluations(), 10);
    }

    #[test]
    fn test_probes_come_in_symmetric_pairs() {
        let mut opt = Spsa::new(vec![0.0, 0.0], 4).with_seed(3);
        let plus = opt.propose();
        opt.accept(quadratic(&plus));
        let minus = opt.propose();
        opt.accept(quadratic(&minus));
        // θ ± cΔ around the same center
        let mid: Vec<f64> = plus.iter().zip(&minus).map(|(p, m)| (p + m) / 2.0).collect();
        assert!((mid[0]).abs() < 1e-12);
        assert!((mid[1]).abs() < 1e-12);
    }

    #[test]
    fn test_improves_on_a_quadratic() {
        let start = vec![3.0];
        let start_value = quadratic(&start);
        let mut opt = Spsa::new(start, 200).with_seed(42).with_gains(0.5, 0.1);
        while !opt.is_done() {
            let point = opt.propose();
            opt.accept(quadratic(&point));
        }
        let (_, best) = opt.best();
        assert!(best < start_value, "best {best} should beat {start_value}");
    }

    #[test]
    fn test_repeated_propose_reissues_point() {
        let mut opt = Spsa::new(vec![0.5], 2).with_seed(1);
        let first = opt.propose();
        let again = opt.propose();
        assert_eq!(first, again);
    }
}
