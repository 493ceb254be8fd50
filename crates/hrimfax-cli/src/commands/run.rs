//! Run command implementation.

use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use hrimfax_exec::{Dispatcher, initialize};
use hrimfax_ir::{Circuit, CircuitBuilder};
use hrimfax_templates::{append_qft, bell_state, ghz_state};

use crate::commands::common::print_results;

/// Built-in circuit templates runnable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CircuitKind {
    /// Two-qubit Bell pair.
    Bell,
    /// N-qubit GHZ state.
    Ghz,
    /// N-qubit quantum Fourier transform.
    Qft,
}

fn build_circuit(kind: CircuitKind, qubits: u32) -> Result<Circuit> {
    let circuit = match kind {
        CircuitKind::Bell => bell_state(true)?,
        CircuitKind::Ghz => {
            anyhow::ensure!(qubits >= 2, "GHZ needs at least 2 qubits, got {qubits}");
            ghz_state(qubits, true)?
        }
        CircuitKind::Qft => {
            anyhow::ensure!(qubits >= 1, "QFT needs at least 1 qubit");
            let mut b = CircuitBuilder::new("qft", qubits, qubits);
            append_qft(&mut b, qubits)?;
            b.measure_all()?;
            b.build()
        }
    };
    Ok(circuit)
}

/// Execute the run command.
pub async fn execute(
    kind: CircuitKind,
    backend: &str,
    shots: i64,
    qubits: u32,
    optimization_level: u8,
) -> Result<()> {
    let circuit = build_circuit(kind, qubits)?;

    println!(
        "{} Running {} ({} qubits, {} ops) on {}",
        style("Hrimfax").cyan().bold(),
        style(circuit.name()).bold(),
        circuit.num_qubits(),
        circuit.num_ops(),
        style(backend).bold()
    );

    let dispatcher = Dispatcher::new(initialize().await);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("executing {shots} shots..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = dispatcher
        .run(&circuit, backend, shots, optimization_level)
        .await;
    spinner.finish_and_clear();

    let result = outcome?;
    print_results(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_template_ignores_qubit_arg() {
        let c = build_circuit(CircuitKind::Bell, 7).unwrap();
        assert_eq!(c.num_qubits(), 2);
        assert!(c.has_measurements());
    }

    #[test]
    fn test_ghz_template_uses_qubit_arg() {
        let c = build_circuit(CircuitKind::Ghz, 5).unwrap();
        assert_eq!(c.num_qubits(), 5);
    }

    #[test]
    fn test_qft_template_is_measured() {
        let c = build_circuit(CircuitKind::Qft, 3).unwrap();
        assert_eq!(c.num_qubits(), 3);
        assert_eq!(c.num_clbits(), 3);
        assert!(c.has_measurements());
    }

    #[test]
    fn test_undersized_ghz_rejected() {
        assert!(build_circuit(CircuitKind::Ghz, 1).is_err());
    }
}
