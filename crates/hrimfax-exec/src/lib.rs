//! Hrimfax Execution Layer
//!
//! Ties the HAL and the adapters together: [`initialize`] builds the
//! process registry (local simulators always, remote devices when
//! credentials are present), [`lower`] prepares circuits for a target,
//! and [`Dispatcher`] runs the full submit/wait lifecycle.
//!
//! ```no_run
//! use hrimfax_exec::{Dispatcher, initialize};
//! use hrimfax_templates::bell_state;
//!
//! # async fn demo() -> hrimfax_hal::HalResult<()> {
//! # let _ = bell_state(true);
//! let dispatcher = Dispatcher::new(initialize().await);
//! let circuit = bell_state(true)?;
//! let result = dispatcher.run(&circuit, "aer_simulator", 1000, 1).await?;
//! println!("{:?}", result.counts.sorted());
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod lower;
pub mod registry;

pub use dispatch::Dispatcher;
pub use lower::lower;
pub use registry::initialize;
