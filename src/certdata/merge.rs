//! Trust merger
//!
//! Indexes certificate records by label and attaches the `CKA_TRUST_*`
//! attributes of the matching trust record to each of them.

use crate::certdata::record::{
    ObjectClass, Record, CKA_LABEL, CKA_TRUST_SERVER_AUTH, CKT_NSS_TRUSTED_DELEGATOR,
};
use crate::utils::MergeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Merger behaviour switches
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Fail when two certificates share a label instead of keeping the last
    pub reject_duplicate_labels: bool,
}

/// A certificate together with its trust settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub trust: BTreeMap<String, String>,
}

impl RootEntry {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn trust_value(&self, name: &str) -> Option<&str> {
        self.trust.get(name).map(String::as_str)
    }

    /// Whether this root may issue server certificates
    pub fn is_server_auth_delegator(&self) -> bool {
        self.trust_value(CKA_TRUST_SERVER_AUTH) == Some(CKT_NSS_TRUSTED_DELEGATOR)
    }
}

/// Merged roots keyed by certificate label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootStore {
    roots: BTreeMap<String, RootEntry>,
}

impl RootStore {
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&RootEntry> {
        self.roots.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RootEntry)> {
        self.roots.iter().map(|(label, entry)| (label.as_str(), entry))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Number of roots trusted to delegate for server auth
    pub fn server_auth_count(&self) -> usize {
        self.roots
            .values()
            .filter(|entry| entry.is_server_auth_delegator())
            .count()
    }

    /// The subset of roots trusted to delegate for server auth
    pub fn server_auth_roots(&self) -> RootStore {
        let roots = self
            .roots
            .iter()
            .filter(|(_, entry)| entry.is_server_auth_delegator())
            .map(|(label, entry)| (label.clone(), entry.clone()))
            .collect();
        RootStore { roots }
    }
}

impl FromIterator<(String, RootEntry)> for RootStore {
    fn from_iter<I: IntoIterator<Item = (String, RootEntry)>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

fn required_label(record: &Record, index: usize) -> Result<String, MergeError> {
    record
        .label()
        .map(str::to_string)
        .ok_or_else(|| MergeError::MissingAttribute {
            class: record
                .class()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            index,
            attribute: CKA_LABEL.to_string(),
        })
}

/// Merge parsed records into one entry per certificate.
///
/// Records of other classes are ignored, as are trust records whose label
/// matches no certificate. Every certificate must receive trust attributes.
pub fn merge_trust(records: Vec<Record>, options: MergeOptions) -> Result<RootStore, MergeError> {
    let mut certificates = Vec::new();
    let mut trusts = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match record.class() {
            Some(ObjectClass::Certificate) => certificates.push((index, record)),
            Some(ObjectClass::NssTrust) => trusts.push((index, record)),
            Some(_) => {}
            None => tracing::warn!("Record #{} has no CKA_CLASS, skipping", index),
        }
    }

    let mut pending: BTreeMap<String, (Record, Option<BTreeMap<String, String>>)> =
        BTreeMap::new();

    for (index, cert) in certificates {
        let label = required_label(&cert, index)?;
        if pending.contains_key(&label) {
            if options.reject_duplicate_labels {
                return Err(MergeError::DuplicateLabel { label });
            }
            tracing::warn!("Duplicate certificate label {:?}, keeping the later one", label);
        }
        pending.insert(label, (cert, None));
    }

    for (index, trust) in trusts {
        let label = required_label(&trust, index)?;
        match pending.get_mut(&label) {
            Some((_, slot)) => *slot = Some(trust.trust_fields()),
            None => tracing::debug!("Trust record {:?} matches no certificate", label),
        }
    }

    let untrusted: Vec<String> = pending
        .iter()
        .filter(|(_, (_, trust))| trust.as_ref().map_or(true, BTreeMap::is_empty))
        .map(|(label, _)| label.clone())
        .collect();
    if !untrusted.is_empty() {
        return Err(MergeError::MissingTrust { labels: untrusted });
    }

    Ok(pending
        .into_iter()
        .map(|(label, (cert, trust))| {
            let entry = RootEntry {
                fields: cert.into_fields(),
                trust: trust.unwrap_or_default(),
            };
            (label, entry)
        })
        .collect())
}
