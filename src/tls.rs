//! TLS client configuration for the stream endpoint.
//!
//! Builds a [`rustls::ClientConfig`] on the `ring` provider that trusts the
//! Mozilla root set shipped in `webpki-roots`.

use std::sync::Arc;

use rustls::{ClientConfig, RootCertStore};

use crate::Result;

/// Builds a [`ClientConfig`] with the bundled web PKI roots.
///
/// # Errors
///
/// Returns [`DashError::Tls`](crate::DashError::Tls) if the provider
/// rejects the default protocol versions.
pub fn build_tls_config() -> Result<ClientConfig> {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config =
        ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .map_err(|e| crate::DashError::Tls(format!("failed to select TLS versions: {e}")))?
            .with_root_certificates(root_store)
            .with_no_client_auth();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_bundled_roots() {
        assert!(build_tls_config().is_ok());
        assert!(!webpki_roots::TLS_SERVER_ROOTS.is_empty());
    }
}
