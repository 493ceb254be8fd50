//! Hrimfax Circuit Template Library
//!
//! Pure factory functions producing common circuit shapes through the
//! [`hrimfax_ir`] builder. No shared state; every call returns a freshly
//! built [`Circuit`](hrimfax_ir::Circuit).
//!
//! | Template | Shape |
//! |----------|-------|
//! | [`bell_state`] | H(0), CX(0,1) |
//! | [`ghz_state`] | H(0), CX(0,k) fan-out |
//! | [`qft`] / [`qft_inverse`] | standard Fourier rotation ladder + swap pass |
//! | [`grover_oracle`] / [`grover_diffuser`] | phase-flip oracle and inversion about the mean |
//! | [`hardware_efficient_ansatz`] | parameterized Ry layers + CNOT chain |
//! | [`real_amplitudes`] | Ry layers + fully connected entanglement |
//! | [`zz_feature_map`] | second-order Pauli-Z data encoding |
//! | [`phase_estimation`] | binary-weighted kickback + inverse QFT |

pub mod ansatz;
pub mod basic;
pub mod feature_map;
pub mod grover;
pub mod phase_estimation;
pub mod qft;

pub use ansatz::{append_real_amplitudes, hardware_efficient_ansatz, real_amplitudes};
pub use basic::{bell_state, ghz_state};
pub use feature_map::{append_zz_feature_map, zz_feature_map};
pub use grover::{append_diffuser, append_oracle, grover_diffuser, grover_oracle};
pub use phase_estimation::phase_estimation;
pub use qft::{append_qft, append_qft_inverse, qft, qft_inverse};
