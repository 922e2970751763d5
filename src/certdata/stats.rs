//! Root store statistics
//!
//! Decodes the certificates of the server-auth roots and tallies their
//! public key algorithms, EC curves and RSA modulus sizes.

use crate::certdata::merge::RootStore;
use crate::certdata::record::CKA_VALUE;
use crate::utils::StatsError;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use std::collections::BTreeMap;
use x509_parser::nom;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

const ALG_RSA: &str = "RSA";
const ALG_ECDSA: &str = "ECDSA";

/// Counters gathered over a root store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub processed: usize,
    pub skipped_non_server_auth: usize,
    pub skipped_missing_value: usize,
    pub skipped_bad_base64: usize,
    pub skipped_bad_der: usize,
    pub good: usize,
    pub algorithms: BTreeMap<String, usize>,
    pub ec_curves: BTreeMap<String, usize>,
    pub rsa_key_sizes: BTreeMap<usize, usize>,
}

/// Public key of a decoded root
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyKind {
    Rsa(usize),
    Ecdsa(String),
    Other(String),
}

/// Analyze every root trusted to delegate for server auth
pub fn analyze(store: &RootStore) -> StoreStats {
    let mut stats = StoreStats::default();

    for (label, entry) in store.iter() {
        stats.processed += 1;

        if !entry.is_server_auth_delegator() {
            stats.skipped_non_server_auth += 1;
            continue;
        }

        let Some(encoded) = entry.get(CKA_VALUE) else {
            stats.skipped_missing_value += 1;
            tracing::warn!("No {} for label [{}]", CKA_VALUE, label);
            continue;
        };

        let der = match STANDARD.decode(encoded) {
            Ok(der) => der,
            Err(e) => {
                stats.skipped_bad_base64 += 1;
                tracing::warn!("Error decoding base64 for label [{}]: {}", label, e);
                continue;
            }
        };

        let kind = match key_kind(&der) {
            Ok(kind) => kind,
            Err(e) => {
                stats.skipped_bad_der += 1;
                tracing::warn!("Error parsing certificate for label [{}]: {}", label, e);
                continue;
            }
        };

        stats.good += 1;
        match kind {
            KeyKind::Rsa(bits) => {
                *stats.algorithms.entry(ALG_RSA.to_string()).or_default() += 1;
                *stats.rsa_key_sizes.entry(bits).or_default() += 1;
            }
            KeyKind::Ecdsa(curve) => {
                *stats.algorithms.entry(ALG_ECDSA.to_string()).or_default() += 1;
                *stats.ec_curves.entry(curve).or_default() += 1;
            }
            KeyKind::Other(name) => {
                *stats.algorithms.entry(name).or_default() += 1;
            }
        }
    }

    stats
}

fn key_kind(der: &[u8]) -> Result<KeyKind, X509Error> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => X509Error::InvalidCertificate,
    })?;

    let spki = cert.public_key();
    let alg_oid = spki.algorithm.algorithm.to_string();

    let kind = match spki.parsed() {
        Ok(PublicKey::RSA(rsa)) => KeyKind::Rsa(modulus_bits(rsa.modulus)),
        Ok(PublicKey::EC(_)) => {
            let curve = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|p| p.as_oid().ok())
                .map(|oid| curve_name(&oid.to_string()))
                .unwrap_or_else(|| "Unknown".to_string());
            KeyKind::Ecdsa(curve)
        }
        _ => KeyKind::Other(algorithm_name(&alg_oid)),
    };

    Ok(kind)
}

/// Bit length of a big-endian modulus, ignoring leading zero bytes
fn modulus_bits(modulus: &[u8]) -> usize {
    let significant: &[u8] = match modulus.iter().position(|&b| b != 0) {
        Some(start) => &modulus[start..],
        None => return 0,
    };
    let top = significant[0];
    (significant.len() - 1) * 8 + (8 - top.leading_zeros() as usize)
}

fn curve_name(oid: &str) -> String {
    match oid {
        "1.2.840.10045.3.1.7" => "P-256".to_string(),
        "1.3.132.0.34" => "P-384".to_string(),
        "1.3.132.0.35" => "P-521".to_string(),
        _ => oid.to_string(),
    }
}

fn algorithm_name(oid: &str) -> String {
    match oid {
        "1.3.101.112" => "Ed25519".to_string(),
        "1.3.101.113" => "Ed448".to_string(),
        "1.2.840.10040.4.1" => "DSA".to_string(),
        _ => oid.to_string(),
    }
}

/// Read back a root store previously written as JSON
pub fn store_from_json(text: &str) -> Result<RootStore, StatsError> {
    serde_json::from_str(text).map_err(|e| StatsError::InvalidStore {
        message: e.to_string(),
    })
}
