//! List-backends command implementation.

use anyhow::Result;
use console::style;

use hrimfax_exec::initialize;

/// Execute the list-backends command.
pub async fn execute() -> Result<()> {
    let registry = initialize().await;

    println!("{} Available backends:\n", style("Hrimfax").cyan().bold());

    for name in registry.list() {
        let summary = registry.describe(&name)?;
        let backend = registry.get(&name)?;
        let available = backend.availability().await.is_ok_and(|a| a.is_available);

        println!(
            "  {} {} ({})",
            if available {
                style("●").green()
            } else {
                style("○").yellow()
            },
            style(&summary.name).bold(),
            if summary.is_simulator {
                "simulator"
            } else {
                "hardware"
            }
        );
        println!("    Qubits: {}", summary.num_qubits);
        println!("    Max shots: {}", summary.max_shots);
        println!(
            "    Gates: {}",
            summary
                .native_gates
                .join(", ")
                .chars()
                .take(50)
                .collect::<String>()
        );
        println!();
    }

    Ok(())
}
