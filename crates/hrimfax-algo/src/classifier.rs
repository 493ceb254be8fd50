//! Variational quantum classifier for binary labels.

use std::sync::Arc;

use tracing::{debug, info};

use hrimfax_ir::{Circuit, CircuitBuilder};
use hrimfax_templates::{append_real_amplitudes, append_zz_feature_map, real_amplitudes};

use crate::error::{AlgoError, AlgoResult};
use crate::estimator::Estimator;
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};
use crate::optimizer::Optimizer;
use crate::vqe::VariationalOutcome;

/// Per-feature standardization fitted on the training set.
///
/// Columns with zero variance pass through unscaled so constant features
/// do not blow up to NaN.
#[derive(Debug, Clone)]
struct FeatureScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl FeatureScaler {
    fn fit(samples: &[Vec<f64>]) -> Self {
        let dim = samples.first().map_or(0, Vec::len);
        let count = samples.len() as f64;

        let mut means = vec![0.0; dim];
        for sample in samples {
            for (m, x) in means.iter_mut().zip(sample) {
                *m += x / count;
            }
        }

        let mut stds = vec![0.0; dim];
        for sample in samples {
            for ((s, m), x) in stds.iter_mut().zip(&means).zip(sample) {
                *s += (x - m) * (x - m) / count;
            }
        }
        for s in &mut stds {
            *s = s.sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Self { means, stds }
    }

    fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}

/// Binary classifier built from a data-encoding feature map and a
/// trainable real-amplitudes ansatz.
///
/// Each sample is standardized, padded or truncated to the register
/// width, encoded through the feature map, and pushed through the bound
/// ansatz; the readout is ⟨Z⟩ on qubit 0. Label 0 maps to the +1
/// eigenvalue and label 1 to −1, and training minimizes the mean squared
/// distance between readout and target over the training set.
pub struct QuantumClassifier {
    num_qubits: u32,
    feature_map_reps: u32,
    ansatz_reps: u32,
    estimator: Arc<dyn Estimator>,
    readout: Hamiltonian,
    scaler: Option<FeatureScaler>,
    weights: Option<Vec<f64>>,
}

impl QuantumClassifier {
    /// Configure an untrained classifier.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoError::InvalidConfiguration`] for an empty register.
    pub fn new(
        num_qubits: u32,
        feature_map_reps: u32,
        ansatz_reps: u32,
        estimator: Arc<dyn Estimator>,
    ) -> AlgoResult<Self> {
        if num_qubits == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "classifier needs at least one qubit".into(),
            ));
        }
        Ok(Self {
            num_qubits,
            feature_map_reps,
            ansatz_reps,
            estimator,
            readout: Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]),
            scaler: None,
            weights: None,
        })
    }

    /// Number of trainable ansatz parameters.
    pub fn num_parameters(&self) -> usize {
        (self.num_qubits * (self.ansatz_reps + 1)) as usize
    }

    /// True once `fit` has stored a weight vector.
    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// Standardize and resize one sample to the register width.
    fn encode(&self, features: &[f64]) -> Vec<f64> {
        let scaled = match &self.scaler {
            Some(scaler) => scaler.transform(features),
            None => features.to_vec(),
        };
        let mut encoded = scaled;
        encoded.resize(self.num_qubits as usize, 0.0);
        encoded
    }

    /// Feature map followed by the ansatz bound at `weights`.
    fn sample_circuit(&self, features: &[f64], weights: &[f64]) -> AlgoResult<Circuit> {
        let encoded = self.encode(features);
        let mut b = CircuitBuilder::new("vqc", self.num_qubits, 0);
        append_zz_feature_map(&mut b, &encoded, self.feature_map_reps)?;
        append_real_amplitudes(&mut b, self.num_qubits, self.ansatz_reps)?;
        Ok(b.build().bind_values(weights)?)
    }

    async fn loss(
        &self,
        samples: &[Vec<f64>],
        targets: &[f64],
        weights: &[f64],
    ) -> AlgoResult<f64> {
        let mut total = 0.0;
        for (sample, target) in samples.iter().zip(targets) {
            let circuit = self.sample_circuit(sample, weights)?;
            let readout = self.estimator.expectation(&circuit, &self.readout).await?;
            total += (readout - target) * (readout - target);
        }
        Ok(total / samples.len() as f64)
    }

    /// Train on labeled samples, storing the best weight vector found.
    ///
    /// The optimizer owns the termination policy, exactly as in the other
    /// variational drivers. Refitting replaces the scaler and weights.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoError::InvalidConfiguration`] for an empty training
    /// set, mismatched sample/label lengths, or labels outside {0, 1}.
    /// Estimator failures propagate unchanged.
    pub async fn fit(
        &mut self,
        samples: &[Vec<f64>],
        labels: &[u8],
        mut optimizer: Box<dyn Optimizer>,
    ) -> AlgoResult<VariationalOutcome> {
        if samples.is_empty() {
            return Err(AlgoError::InvalidConfiguration(
                "training set is empty".into(),
            ));
        }
        if samples.len() != labels.len() {
            return Err(AlgoError::InvalidConfiguration(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(AlgoError::InvalidConfiguration(format!(
                "labels must be 0 or 1, got {bad}"
            )));
        }

        self.scaler = Some(FeatureScaler::fit(samples));
        let targets: Vec<f64> = labels
            .iter()
            .map(|&l| if l == 0 { 1.0 } else { -1.0 })
            .collect();
        debug!(
            samples = samples.len(),
            parameters = self.num_parameters(),
            "starting classifier training"
        );

        let mut trace = Vec::new();
        let mut eval_index = 0usize;
        while !optimizer.is_done() {
            let point = optimizer.propose();
            let value = self.loss(samples, &targets, &point).await?;
            optimizer.accept(value);
            trace.push((eval_index, value));
            eval_index += 1;
        }
        if trace.is_empty() {
            return Err(AlgoError::InvalidConfiguration(
                "optimizer finished without a single evaluation".into(),
            ));
        }

        let (best_point, best_value) = optimizer.best();
        info!(
            evaluations = eval_index,
            training_loss = best_value,
            "classifier training complete"
        );
        let names = real_amplitudes(self.num_qubits, self.ansatz_reps)?.parameters();
        self.weights = Some(best_point.clone());

        Ok(VariationalOutcome {
            optimal_value: best_value,
            optimal_parameters: names.into_iter().zip(best_point).collect(),
            trace,
            evaluations: eval_index,
        })
    }

    /// The raw readout ⟨Z₀⟩ in [−1, 1] for one sample.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoError::InvalidConfiguration`] before training.
    pub async fn decision_function(&self, features: &[f64]) -> AlgoResult<f64> {
        let weights = self.weights.as_ref().ok_or_else(|| {
            AlgoError::InvalidConfiguration("classifier has not been trained".into())
        })?;
        let circuit = self.sample_circuit(features, weights)?;
        self.estimator.expectation(&circuit, &self.readout).await
    }

    /// Predict the binary label for one sample.
    pub async fn predict(&self, features: &[f64]) -> AlgoResult<u8> {
        let readout = self.decision_function(features).await?;
        Ok(u8::from(readout < 0.0))
    }
}
