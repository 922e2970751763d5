use certdata_json::certdata::octal::{decode_escapes, encode_octal};
use certdata_json::certdata::{
    merge_trust, parse_str, MergeOptions, ObjectClass, ParseOptions, RootStore,
};
use certdata_json::utils::{MergeError, ParseError};

const FIXTURE: &str = include_str!("fixtures/certdata.txt");

fn convert(text: &str) -> Result<RootStore, String> {
    let outcome = parse_str(text, ParseOptions::default()).map_err(|e| e.to_string())?;
    merge_trust(outcome.records, MergeOptions::default()).map_err(|e| e.to_string())
}

#[test]
fn test_fixture_records() {
    let outcome = parse_str(FIXTURE, ParseOptions::default()).unwrap();
    assert!(outcome.malformed.is_empty());
    assert_eq!(outcome.records.len(), 7);
    assert_eq!(
        outcome.records[0].class(),
        Some(ObjectClass::BuiltinRootList)
    );

    let classes: Vec<ObjectClass> = outcome
        .records
        .iter()
        .skip(1)
        .filter_map(|r| r.class())
        .collect();
    assert_eq!(
        classes,
        vec![
            ObjectClass::Certificate,
            ObjectClass::NssTrust,
            ObjectClass::Certificate,
            ObjectClass::NssTrust,
            ObjectClass::Certificate,
            ObjectClass::NssTrust,
        ]
    );
}

#[test]
fn test_fixture_merge() {
    let store = convert(FIXTURE).unwrap();
    assert_eq!(
        store.labels().collect::<Vec<_>>(),
        vec!["Example EC Root", "Example Mail Root", "Example RSA Root"]
    );
    assert_eq!(store.server_auth_count(), 2);

    let rsa = store.get("Example RSA Root").unwrap();
    assert_eq!(rsa.get("CKA_ID"), Some("0"));
    assert_eq!(rsa.get("CKA_SERIAL_NUMBER"), Some("AgMBAgM="));
    assert!(rsa
        .get("CKA_VALUE")
        .unwrap()
        .starts_with("MIIDRzCCAi+gAwIBAgIU"));
    assert_eq!(rsa.trust.len(), 4);
    assert_eq!(rsa.trust_value("CKA_TRUST_STEP_UP_APPROVED"), Some("CK_FALSE"));
    assert!(rsa.trust.keys().all(|k| k.starts_with("CKA_TRUST_")));

    let mail = store.get("Example Mail Root").unwrap();
    assert!(!mail.is_server_auth_delegator());
}

#[test]
fn test_trusted_delegator_scenario() {
    let store = convert(
        "CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\n\
         CKA_LABEL UTF8 \"Foo\"\n\
         CKA_CLASS CK_OBJECT_CLASS CKO_NSS_TRUST\n\
         CKA_LABEL UTF8 \"Foo\"\n\
         CKA_TRUST_SERVER_AUTH CK_TRUST CKT_NSS_TRUSTED_DELEGATOR\n",
    )
    .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("Foo").unwrap().trust_value("CKA_TRUST_SERVER_AUTH"),
        Some("CKT_NSS_TRUSTED_DELEGATOR")
    );
}

#[test]
fn test_missing_trust_scenario() {
    let outcome = parse_str(
        "CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\nCKA_LABEL UTF8 \"Bar\"\n",
        ParseOptions::default(),
    )
    .unwrap();
    let err = merge_trust(outcome.records, MergeOptions::default()).unwrap_err();
    assert_eq!(
        err,
        MergeError::MissingTrust {
            labels: vec!["Bar".to_string()]
        }
    );
    assert!(err.to_string().contains("Bar"));
}

#[test]
fn test_multiline_scenario() {
    let outcome = parse_str(
        "CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\nCKA_VALUE MULTILINE_OCTAL\n\\101\\102\\103\nEND\n",
        ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.records[0].get("CKA_VALUE"), Some("QUJD"));
}

#[test]
fn test_end_anywhere_outside_multiline() {
    let inputs = [
        ("END\n", 1),
        ("CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\nEND\n", 2),
        (
            "CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\nCKA_VALUE MULTILINE_OCTAL\n\\101\nEND\nEND\n",
            5,
        ),
    ];
    for (input, line) in inputs {
        assert_eq!(
            parse_str(input, ParseOptions::default()).unwrap_err(),
            ParseError::UnexpectedEnd { line }
        );
    }
}

#[test]
fn test_octal_round_trip() {
    let samples: [&[u8]; 4] = [b"", b"ABC", &[0x00, 0x7f, 0x80, 0xff], b"\\\"#END"];
    for bytes in samples {
        let encoded = encode_octal(bytes);
        assert_eq!(decode_escapes(&encoded).unwrap(), bytes);
    }
}

#[test]
fn test_single_line_values_preserved() {
    let store = convert(
        "CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE\n\
         CKA_LABEL UTF8 \"Foo Bar, Inc. (Root) 2024\"\n\
         CKA_NSS_SERVER_DISTRUST_AFTER CK_BBOOL CK_FALSE\n\
         CKA_CLASS CK_OBJECT_CLASS CKO_NSS_TRUST\n\
         CKA_LABEL UTF8 \"Foo Bar, Inc. (Root) 2024\"\n\
         CKA_TRUST_SERVER_AUTH CK_TRUST CKT_NSS_MUST_VERIFY_TRUST\n",
    )
    .unwrap();
    let entry = store.get("Foo Bar, Inc. (Root) 2024").unwrap();
    assert_eq!(entry.get("CKA_NSS_SERVER_DISTRUST_AFTER"), Some("CK_FALSE"));
    assert_eq!(store.server_auth_count(), 0);
}
