//! Hrimfax IBM Quantum Adapter
//!
//! Remote execution against IBM Quantum devices through the Runtime REST
//! API. Authentication is a bearer token read from the
//! `IBM_QUANTUM_TOKEN` environment variable; [`discover`] enumerates the
//! account's devices and wraps each as a HAL backend.

use std::sync::Arc;

pub mod api;
pub mod backend;
pub mod error;

pub use api::{DeviceInfo, IbmClient};
pub use backend::IbmBackend;
pub use error::{IbmError, IbmResult};

/// Enumerate the account's devices as ready-to-register backends.
///
/// Devices whose configuration cannot be fetched are skipped with a
/// warning rather than failing the whole discovery.
pub async fn discover() -> IbmResult<Vec<IbmBackend>> {
    let client = Arc::new(IbmClient::from_env()?);
    let names = client.list_devices().await?;

    let mut backends = Vec::with_capacity(names.len());
    for name in names {
        match client.get_device(&name).await {
            Ok(info) => backends.push(IbmBackend::from_device(Arc::clone(&client), &info)),
            Err(e) => tracing::warn!("skipping device {name}: {e}"),
        }
    }
    Ok(backends)
}
