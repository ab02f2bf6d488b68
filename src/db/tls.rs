//! TLS connectors for the database pool.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio_postgres_rustls::MakeRustlsConnect;

use crate::config::TlsMode;
use crate::db::DbError;

/// Build a rustls connector for `mode`. `Disable` has no connector.
pub fn connector(mode: TlsMode, ca_cert_path: Option<&Path>) -> Result<MakeRustlsConnect, DbError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| DbError::Tls(e.to_string()))?;

    let config = match mode {
        TlsMode::Disable => return Err(DbError::Tls("TLS is disabled".into())),
        TlsMode::Require => builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
            .with_no_client_auth(),
        TlsMode::Verify => {
            let path = ca_cert_path
                .ok_or_else(|| DbError::Tls("certificate verification needs a CA bundle".into()))?;
            builder
                .with_root_certificates(load_roots(path)?)
                .with_no_client_auth()
        }
    };

    Ok(MakeRustlsConnect::new(config))
}

/// Load trusted roots from a PEM bundle.
pub fn load_roots(path: &Path) -> Result<RootCertStore, DbError> {
    let ca_bundle = |source| DbError::CaBundle {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(ca_bundle)?;
    let mut reader = BufReader::new(file);

    let mut roots = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut reader) {
        let cert = cert.map_err(ca_bundle)?;
        roots.add(cert).map_err(|e| DbError::Tls(e.to_string()))?;
    }

    if roots.is_empty() {
        return Err(DbError::Tls(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    Ok(roots)
}

/// Accepts any server certificate while still checking handshake
/// signatures, giving an encrypted but unauthenticated channel.
#[derive(Debug)]
struct AcceptAnyServerCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
