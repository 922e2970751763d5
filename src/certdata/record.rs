//! Flat certdata objects
//!
//! A record is everything between two `CKA_CLASS` lines: a mapping from
//! attribute name to its textual value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const CKA_CLASS: &str = "CKA_CLASS";
pub const CKA_LABEL: &str = "CKA_LABEL";
pub const CKA_VALUE: &str = "CKA_VALUE";
pub const CKA_TRUST_PREFIX: &str = "CKA_TRUST_";
pub const CKA_TRUST_SERVER_AUTH: &str = "CKA_TRUST_SERVER_AUTH";
pub const CKT_NSS_TRUSTED_DELEGATOR: &str = "CKT_NSS_TRUSTED_DELEGATOR";

/// Value of the `CKA_CLASS` attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    BuiltinRootList,
    Certificate,
    NssTrust,
    Other(String),
}

impl ObjectClass {
    pub fn from_value(value: &str) -> Self {
        match value {
            "CKO_NSS_BUILTIN_ROOT_LIST" => ObjectClass::BuiltinRootList,
            "CKO_CERTIFICATE" => ObjectClass::Certificate,
            "CKO_NSS_TRUST" => ObjectClass::NssTrust,
            other => ObjectClass::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectClass::BuiltinRootList => "CKO_NSS_BUILTIN_ROOT_LIST",
            ObjectClass::Certificate => "CKO_CERTIFICATE",
            ObjectClass::NssTrust => "CKO_NSS_TRUST",
            ObjectClass::Other(value) => value,
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One object from the dump, in attribute-name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn class(&self) -> Option<ObjectClass> {
        self.get(CKA_CLASS).map(ObjectClass::from_value)
    }

    pub fn label(&self) -> Option<&str> {
        self.get(CKA_LABEL)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attributes whose names start with `CKA_TRUST_`
    pub fn trust_fields(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter(|(name, _)| name.starts_with(CKA_TRUST_PREFIX))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_class_round_trip() {
        for value in ["CKO_NSS_BUILTIN_ROOT_LIST", "CKO_CERTIFICATE", "CKO_NSS_TRUST"] {
            assert_eq!(ObjectClass::from_value(value).as_str(), value);
        }
        assert_eq!(
            ObjectClass::from_value("CKO_PUBLIC_KEY"),
            ObjectClass::Other("CKO_PUBLIC_KEY".to_string())
        );
    }

    #[test]
    fn test_trust_fields_filter_by_prefix() {
        let mut record = Record::new();
        record.insert(CKA_CLASS, "CKO_NSS_TRUST");
        record.insert(CKA_LABEL, "Foo");
        record.insert("CKA_TRUST_SERVER_AUTH", CKT_NSS_TRUSTED_DELEGATOR);
        record.insert("CKA_TRUST_STEP_UP_APPROVED", "CK_FALSE");
        record.insert("CKA_CERT_SHA1_HASH", "abc");

        let trust = record.trust_fields();
        assert_eq!(trust.len(), 2);
        assert!(trust.contains_key("CKA_TRUST_SERVER_AUTH"));
        assert!(trust.contains_key("CKA_TRUST_STEP_UP_APPROVED"));
    }

    #[test]
    fn test_class_and_label() {
        let mut record = Record::new();
        assert!(record.class().is_none());
        record.insert(CKA_CLASS, "CKO_CERTIFICATE");
        record.insert(CKA_LABEL, "Bar");
        assert_eq!(record.class(), Some(ObjectClass::Certificate));
        assert_eq!(record.label(), Some("Bar"));
    }
}
