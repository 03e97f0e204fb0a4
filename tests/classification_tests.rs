#![cfg(feature = "classification")]

use std::io::Write;

use chrono::NaiveDate;
use nfts::NftsError;
use nfts::classification::{ClassificationEntry, ClassificationTable, normalize_key};
use nfts::core::{
    InvoiceRecordBuilder, LayoutVariant, ProviderType, ValidationContext, validate_record,
};

const RATE_TABLE: &str = r#"[
    {"classificacao": "1.01", "aliquota": "2,90", "cnae": "6201501"},
    {"classificacao": "1.07", "aliquota": "2,90", "cnae": "1402"},
    {"classificacao": "7.02", "aliquota": "2,00", "cnae": ""},
    {"classificacao": "17.01", "aliquota": "5,00", "cnae": "69206"},
    {"classificacao": "17.19", "aliquota": "5,00"}
]"#;

fn table() -> ClassificationTable {
    ClassificationTable::from_json(RATE_TABLE).unwrap()
}

#[test]
fn entries_without_code_are_not_loaded() {
    let t = table();
    assert_eq!(t.len(), 3);
    assert_eq!(t.lookup("702"), None);
    assert_eq!(t.lookup("1719"), None);
}

#[test]
fn typing_a_subitem_prefills_the_service_code() {
    let t = table();
    assert_eq!(t.on_field_change("0101").as_deref(), Some("6201501"));
    assert_eq!(t.on_field_change("0107").as_deref(), Some("01402"));
    assert_eq!(t.on_field_change("1701").as_deref(), Some("69206"));
}

#[test]
fn unknown_or_empty_subitem_leaves_field_alone() {
    let t = table();
    assert_eq!(t.on_field_change("0702"), None);
    assert_eq!(t.on_field_change("9999"), None);
    assert_eq!(t.on_field_change(""), None);
    assert_eq!(t.on_field_change("0"), None);
}

#[test]
fn surrounding_whitespace_is_not_stripped() {
    let t = table();
    assert_eq!(t.on_field_change(" 0107"), None);
    assert_eq!(t.on_field_change("0107 "), None);
    assert_eq!(t.on_field_change("   "), None);
}

#[test]
fn prefilled_code_passes_validation() {
    let t = ClassificationTable::from_json(r#"[{"classificacao": "7.10", "cnae": "8121"}]"#).unwrap();
    let code = t.on_field_change("0710").unwrap();
    assert_eq!(code, "08121");

    let today = NaiveDate::from_ymd_opt(2024, 3, 28).unwrap();
    let rec = InvoiceRecordBuilder::new("87", today)
        .service(code, "0710")
        .gross_amount("320,50")
        .provider(ProviderType::Company, "98765432000110")
        .build();
    let ctx = ValidationContext::new(LayoutVariant::Standard).today(today);
    assert!(validate_record(&rec, 1, &ctx).is_empty());
}

#[test]
fn prefilled_code_longer_than_five_digits_is_rejected() {
    let code = table().on_field_change("0101").unwrap();
    assert_eq!(code, "6201501");

    let today = NaiveDate::from_ymd_opt(2024, 3, 28).unwrap();
    let rec = InvoiceRecordBuilder::new("1", today)
        .service(code, "0101")
        .gross_amount("10")
        .provider(ProviderType::Company, "98765432000110")
        .build();
    let ctx = ValidationContext::new(LayoutVariant::Standard).today(today);
    let errors = validate_record(&rec, 1, &ctx);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "service_code");
}

#[test]
fn keys_drop_the_dot() {
    assert_eq!(normalize_key("17.01"), "1701");
    assert_eq!(table().lookup(&normalize_key("1.07")), Some("1402"));
}

#[test]
fn entries_serialize_with_table_field_names() {
    let entry = ClassificationEntry {
        classification: "1.07".into(),
        service_code: "1402".into(),
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["classificacao"], "1.07");
    assert_eq!(json["cnae"], "1402");
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RATE_TABLE.as_bytes()).unwrap();

    let t = ClassificationTable::from_json_file(file.path()).unwrap();
    assert_eq!(t.lookup("107"), Some("1402"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClassificationTable::from_json_file(dir.path().join("aliquotas.json")).unwrap_err();
    assert!(matches!(err, NftsError::Io(_)));
}

#[test]
fn malformed_file_is_classification_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"classificacao\": 1}").unwrap();

    let err = ClassificationTable::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, NftsError::Classification(_)));
}
