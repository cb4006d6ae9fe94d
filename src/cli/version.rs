//! Version command handler

use helmdeck::backend::HelmBackend;

/// Display client version information and the helm it talks to
pub async fn display_version(backend: &dyn HelmBackend) {
    println!("helmdeck {}", env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("  License: {}", env!("CARGO_PKG_LICENSE"));
    match backend.version().await {
        Ok(version) => println!("  helm: {}", version),
        Err(e) => println!("  helm: unavailable ({})", e),
    }
}
