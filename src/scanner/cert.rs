// src/scanner/cert.rs

use num::bigint::Sign;
use num::BigInt;
use std::path::Path;
use thiserror::Error;
use x509_parser::pem::parse_x509_pem;
use x509_parser::public_key::PublicKey;

/// Why a file yielded no RSA modulus. Each stage of the pipeline fails with
/// its own variant so a scan log tells apart "random file in the directory"
/// from "certificate we could not read".
#[derive(Debug, Error)]
pub enum CertError {
    #[error("not a PEM document")]
    NotPem,

    #[error("PEM document is not an X.509 certificate")]
    NotX509,

    #[error("certificate public key is not RSA")]
    NotRsa,

    #[error("corrupt certificate data: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads a file and extracts the RSA public modulus from the PEM X.509
/// certificate it contains.
pub fn read_rsa_modulus(path: &Path) -> Result<BigInt, CertError> {
    let data = std::fs::read(path)?;
    extract_rsa_modulus(&data)
}

/// Extracts the RSA public modulus from PEM-encoded certificate bytes.
pub fn extract_rsa_modulus(data: &[u8]) -> Result<BigInt, CertError> {
    let (_, pem) = parse_x509_pem(data).map_err(|_| CertError::NotPem)?;
    if pem.label != "CERTIFICATE" {
        return Err(CertError::NotX509);
    }
    let cert = pem.parse_x509().map_err(|_| CertError::NotX509)?;
    match cert.public_key().parsed() {
        Ok(PublicKey::RSA(rsa)) => Ok(BigInt::from_bytes_be(Sign::Plus, rsa.modulus)),
        Ok(_) => Err(CertError::NotRsa),
        Err(e) => Err(CertError::Corrupt(e.to_string())),
    }
}
