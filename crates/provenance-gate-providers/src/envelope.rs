// provenance-gate-providers/src/envelope.rs
// ============================================================================
// Module: Envelope Sources
// Description: In-memory and file-backed attestation layer accessors.
// Purpose: Present stored attestation layers through the envelope interface.
// Dependencies: provenance-gate-core, x509-cert
// ============================================================================

//! ## Overview
//! [`InMemoryEnvelopeSource`] holds every accessor result up front.
//! [`FileEnvelopeSource`] reads lazily: the payload file is opened only when
//! the extractor asks for it, and certificates are read only when the
//! signature path did not resolve a signer. Certificates may be stored as
//! DER or as a PEM bundle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Cursor;
use std::io::Read;
use std::path::PathBuf;

use provenance_gate_core::DSSE_ENVELOPE_MEDIA_TYPE;
use provenance_gate_core::EncodedCertificate;
use provenance_gate_core::EnvelopeSource;
use provenance_gate_core::SourceError;
use x509_cert::Certificate;
use x509_cert::der::Encode;

use crate::files::read_file_limited;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum certificate file size in bytes.
const MAX_CERTIFICATE_BYTES: usize = 256 * 1024;

/// Marker that identifies PEM-encoded certificate files.
const PEM_MARKER: &[u8] = b"-----BEGIN";

// ============================================================================
// SECTION: In-Memory Source
// ============================================================================

/// Envelope source backed by in-memory values.
#[derive(Debug, Clone)]
pub struct InMemoryEnvelopeSource {
    /// Declared media type.
    media_type: String,
    /// Envelope bytes.
    payload: Vec<u8>,
    /// Base64 signature; empty for keyless layers.
    signature: String,
    /// Signing certificate.
    certificate: Option<EncodedCertificate>,
    /// Issuing chain.
    chain: Vec<EncodedCertificate>,
}

impl InMemoryEnvelopeSource {
    /// Creates a source with the canonical media type and no signer material.
    #[must_use]
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            media_type: DSSE_ENVELOPE_MEDIA_TYPE.to_string(),
            payload,
            signature: String::new(),
            certificate: None,
            chain: Vec::new(),
        }
    }

    /// Overrides the declared media type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// Sets the base64 signature.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Sets the signing certificate and issuing chain.
    #[must_use]
    pub fn with_certificates(
        mut self,
        certificate: EncodedCertificate,
        chain: Vec<EncodedCertificate>,
    ) -> Self {
        self.certificate = Some(certificate);
        self.chain = chain;
        self
    }
}

impl EnvelopeSource for InMemoryEnvelopeSource {
    fn media_type(&self) -> Result<String, SourceError> {
        Ok(self.media_type.clone())
    }

    fn uncompressed_payload(&self) -> Result<Box<dyn Read + '_>, SourceError> {
        Ok(Box::new(Cursor::new(self.payload.as_slice())))
    }

    fn base64_signature(&self) -> Result<String, SourceError> {
        Ok(self.signature.clone())
    }

    fn certificate(&self) -> Result<EncodedCertificate, SourceError> {
        self.certificate
            .clone()
            .ok_or_else(|| SourceError::Unavailable("no signing certificate".to_string()))
    }

    fn certificate_chain(&self) -> Result<Vec<EncodedCertificate>, SourceError> {
        Ok(self.chain.clone())
    }
}

// ============================================================================
// SECTION: File Source
// ============================================================================

/// Envelope source backed by files on disk.
#[derive(Debug, Clone)]
pub struct FileEnvelopeSource {
    /// Declared media type.
    media_type: String,
    /// Envelope file.
    payload_path: PathBuf,
    /// Base64 signature; empty for keyless layers.
    signature: String,
    /// Signing certificate file (DER or PEM).
    certificate_path: Option<PathBuf>,
    /// Issuing chain file (PEM bundle or single DER).
    chain_path: Option<PathBuf>,
}

impl FileEnvelopeSource {
    /// Creates a file-backed source.
    #[must_use]
    pub fn new(media_type: impl Into<String>, payload_path: PathBuf) -> Self {
        Self {
            media_type: media_type.into(),
            payload_path,
            signature: String::new(),
            certificate_path: None,
            chain_path: None,
        }
    }

    /// Sets the base64 signature.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Sets the certificate file.
    #[must_use]
    pub fn with_certificate_path(mut self, path: PathBuf) -> Self {
        self.certificate_path = Some(path);
        self
    }

    /// Sets the chain file.
    #[must_use]
    pub fn with_chain_path(mut self, path: PathBuf) -> Self {
        self.chain_path = Some(path);
        self
    }
}

impl EnvelopeSource for FileEnvelopeSource {
    fn media_type(&self) -> Result<String, SourceError> {
        Ok(self.media_type.clone())
    }

    fn uncompressed_payload(&self) -> Result<Box<dyn Read + '_>, SourceError> {
        Ok(Box::new(File::open(&self.payload_path)?))
    }

    fn base64_signature(&self) -> Result<String, SourceError> {
        Ok(self.signature.clone())
    }

    fn certificate(&self) -> Result<EncodedCertificate, SourceError> {
        let path = self
            .certificate_path
            .as_ref()
            .ok_or_else(|| SourceError::Unavailable("no signing certificate".to_string()))?;
        read_certificates(&read_file_limited(path, MAX_CERTIFICATE_BYTES)?)?
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Invalid(format!("{} holds no certificate", path.display())))
    }

    fn certificate_chain(&self) -> Result<Vec<EncodedCertificate>, SourceError> {
        match &self.chain_path {
            Some(path) => read_certificates(&read_file_limited(path, MAX_CERTIFICATE_BYTES)?),
            None => Ok(Vec::new()),
        }
    }
}

// ============================================================================
// SECTION: Certificate Decoding
// ============================================================================

/// Decodes a PEM bundle into DER certificates, preserving order.
///
/// # Errors
///
/// Returns [`SourceError::Certificate`] when the bundle is not valid PEM.
pub fn decode_pem_chain(pem: &[u8]) -> Result<Vec<EncodedCertificate>, SourceError> {
    Certificate::load_pem_chain(pem)?
        .iter()
        .map(|certificate| -> Result<EncodedCertificate, SourceError> {
            Ok(EncodedCertificate::from_der(certificate.to_der()?))
        })
        .collect()
}

/// Reads a PEM bundle or a single DER certificate.
fn read_certificates(bytes: &[u8]) -> Result<Vec<EncodedCertificate>, SourceError> {
    let trimmed = bytes.trim_ascii_start();
    if trimmed.starts_with(PEM_MARKER) {
        return decode_pem_chain(trimmed);
    }
    Ok(vec![EncodedCertificate::from_der(bytes.to_vec())])
}
