use elfproef_core::{BsnError, ExhaustionDiagnostics, SpaceEstimate};

fn diagnostics() -> ExhaustionDiagnostics {
    ExhaustionDiagnostics {
        prefix: "1234567".to_string(),
        length: 9,
        unique: true,
        attempts: 1000,
        generated_matching: 9,
        excluded_matching: 0,
        space: SpaceEstimate::new(7, 9, false),
    }
}

#[test]
fn serializes_diagnostics_deterministically() {
    let json = serde_json::to_string_pretty(&diagnostics()).expect("serialize diagnostics");
    let expected = r#"{
  "prefix": "1234567",
  "length": 9,
  "unique": true,
  "attempts": 1000,
  "generated_matching": 9,
  "excluded_matching": 0,
  "space": {
    "free_positions": 2,
    "lower": 9,
    "upper": 10,
    "invalid_only": false
  }
}"#;
    assert_eq!(json, expected);
}

#[test]
fn retry_exhausted_message_carries_arguments_and_bounds() {
    let message = BsnError::RetryExhausted(Box::new(diagnostics())).to_string();
    assert!(message.contains("after 1000 attempts"));
    assert!(message.contains("prefix '1234567', length 9, unique true"));
    assert!(message.contains("9 generated and 0 excluded"));
    assert!(message.contains("between 9 and 10"));
}
