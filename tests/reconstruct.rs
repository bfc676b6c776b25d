use std::io::Write;

use num_bigint::BigInt;
use shamir_recover::{reconstruct, Document, RecoveryError, Strategy};

const SAMPLE: &str = r#"{
    "keys": { "n": 4, "k": 3 },
    "1": { "base": "10", "value": "4" },
    "2": { "base": "2", "value": "111" },
    "3": { "base": "10", "value": "12" },
    "6": { "base": "4", "value": "213" }
}"#;

// y = 2x + 1 with share 4 replaced; share 3 is given as an expression.
const TAMPERED: &str = r#"{
    "keys": { "n": 5, "k": 2 },
    "1": { "base": "10", "value": "3" },
    "2": { "base": "16", "value": "5" },
    "3": { "base": "10", "value": "add(multiply(2,1),5)" },
    "4": { "base": "10", "value": "1100100" },
    "5": { "base": "10", "value": "add(multiply(x,2),1)" }
}"#;

const EXPRESSIONS: &str = r#"{
    "keys": { "n": 4, "k": 2 },
    "1": { "base": "10", "value": "add(x, 6)" },
    "2": { "base": "10", "value": "multiply(x, 4)" },
    "3": { "base": "10", "value": "subtract(30, x, 12)" },
    "4": { "base": "10", "value": "gcd(38, 57)" }
}"#;

#[test]
fn test_sample_document() {
    let document: Document = SAMPLE.parse().unwrap();
    for strategy in [Strategy::Sequential, Strategy::Parallel] {
        let recovery = reconstruct(&document, strategy).unwrap();
        assert_eq!(recovery.secret, BigInt::from(3));
        assert_eq!(recovery.subsets, 4);
        assert_eq!(recovery.votes, 4);
    }
}

#[test]
fn test_nested_call_is_rejected() {
    let document: Document = TAMPERED.parse().unwrap();
    assert!(matches!(
        reconstruct(&document, Strategy::Sequential),
        Err(RecoveryError::MalformedExpression { .. })
    ));
}

#[test]
fn test_tampered_share_is_outvoted() {
    let text = TAMPERED.replace("add(multiply(2,1),5)", "add(x,x,x,-2)");
    let text = text.replace("add(multiply(x,2),1)", "11");
    let document: Document = text.parse().unwrap();

    // Share 4 decodes to 1100100 and disagrees with the line through the rest.
    let recovery = reconstruct(&document, Strategy::Sequential).unwrap();
    assert_eq!(recovery.secret, BigInt::from(1));
    assert_eq!(recovery.votes, 6);
    assert_eq!(recovery.subsets, 10);
}

#[test]
fn test_expression_shares() {
    // y = 4x + 3 except share 2, which evaluates to 8.
    let document: Document = EXPRESSIONS.parse().unwrap();
    let recovery = reconstruct(&document, Strategy::Parallel).unwrap();
    assert_eq!(recovery.secret, BigInt::from(3));
    assert_eq!(recovery.votes, 3);
    assert_eq!(recovery.subsets, 6);
}

#[test]
fn test_insufficient_shares() {
    let document: Document = r#"{
        "keys": { "n": 3, "k": 3 },
        "1": { "base": "10", "value": "4" },
        "2": { "base": "10", "value": "7" }
    }"#
    .parse()
    .unwrap();
    let err = reconstruct(&document, Strategy::Sequential).unwrap_err();
    assert!(err.is_insufficient());
    assert_eq!(
        err.to_string(),
        "insufficient shares: 2 available, 3 required"
    );
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let document = Document::from_path(file.path()).unwrap();
    let recovery = reconstruct(&document, Strategy::Sequential).unwrap();
    assert_eq!(recovery.secret, BigInt::from(3));
}
