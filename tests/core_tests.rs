use chrono::NaiveDate;
use nfts::core::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 6, 15)
}

fn ctx() -> ValidationContext {
    ValidationContext::new(LayoutVariant::Standard).today(today())
}

fn address_ctx() -> ValidationContext {
    ValidationContext::new(LayoutVariant::WithAddress).today(today())
}

fn valid_record() -> InvoiceRecord {
    InvoiceRecordBuilder::new("1", today())
        .service("01402", "0107")
        .gross_amount("100.00")
        .provider(ProviderType::Company, "12345678000199")
        .tax_regime(TaxRegime::Normal)
        .build()
}

fn batch_of(records: Vec<InvoiceRecord>) -> Batch {
    let mut batch = Batch::new("41650719");
    for r in records {
        batch.push(r);
    }
    batch
}

fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

// --- Batch preconditions ---

#[test]
fn valid_batch_has_no_violations() {
    let batch = batch_of(vec![valid_record(), valid_record()]);
    assert!(validate_batch(&batch, &ctx()).is_empty());
}

#[test]
fn empty_batch_rejected() {
    let errors = validate_batch(&Batch::new("41650719"), &ctx());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "records");
    assert_eq!(errors[0].record, None);
}

#[test]
fn malformed_taxpayer_id_rejected() {
    for id in ["", "4165071", "416507190", "4165071A", "4.165.071-9"] {
        let mut batch = batch_of(vec![valid_record()]);
        batch.taxpayer_id = id.into();
        let errors = validate_batch(&batch, &ctx());
        assert_eq!(errors.len(), 1, "{id}");
        assert_eq!(errors[0].field, "taxpayer_id");
        assert_eq!(errors[0].record, None);
    }
}

#[test]
fn batch_errors_come_before_record_errors() {
    let mut rec = valid_record();
    rec.taxation = "Z".into();
    let mut batch = batch_of(vec![rec]);
    batch.taxpayer_id = "x".into();
    let errors = validate_batch(&batch, &ctx());
    assert_eq!(errors[0].field, "taxpayer_id");
    assert_eq!(errors[1].field, "taxation");
    assert_eq!(errors[1].record, Some(1));
}

#[test]
fn record_indices_are_one_based_and_ordered() {
    let mut second = valid_record();
    second.document_number = "".into();
    let mut third = valid_record();
    third.provider_tax_id = "123".into();
    third.subitem = "12345".into();
    let batch = batch_of(vec![valid_record(), second, third]);
    let errors = validate_batch(&batch, &ctx());
    let got: Vec<_> = errors
        .iter()
        .map(|e| (e.record, e.field.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            (Some(2), "document_number"),
            (Some(3), "subitem"),
            (Some(3), "provider_tax_id"),
        ]
    );
}

#[test]
fn violation_messages_snapshot() {
    let mut rec = valid_record();
    rec.document_type = "02".into();
    rec.series = "".into();
    rec.document_number = "ABC".into();
    rec.service_date = "19991231".into();
    rec.tax_rate = "2501".into();
    rec.gross_amount = "1.000,00".into();
    let mut batch = batch_of(vec![valid_record(), rec]);
    batch.taxpayer_id = "123".into();

    let text = messages(&validate_batch(&batch, &ctx())).join("\n");
    insta::assert_snapshot!(text, @r"
    taxpayer_id: must be exactly 8 digits
    record 2: document_number: must have 1 to 12 digits
    record 2: series: required when document type is 02
    record 2: service_date: 19991231 is outside the allowed range 20000101..=20240615
    record 2: tax_rate: 2501 exceeds the maximum of 2500 (25%)
    record 2: gross_amount: must be numeric with an optional 2-digit fraction (e.g. 123.45)
    ");
}

// --- Single-field failures ---

type Corruption = (&'static str, fn(&mut InvoiceRecord));

fn corruptions() -> [Corruption; 13] {
    [
        ("document_type", |r| r.document_type = "04".into()),
        ("document_number", |r| r.document_number = "1234567890123".into()),
        ("series", |r| r.series = "ABCDEF".into()),
        ("service_date", |r| r.service_date = "20240616".into()),
        ("taxation", |r| r.taxation = "t".into()),
        ("service_code", |r| r.service_code = "".into()),
        ("subitem", |r| r.subitem = "1.07".into()),
        ("tax_rate", |r| r.tax_rate = "2501".into()),
        ("gross_amount", |r| r.gross_amount = "12.5".into()),
        ("provider_type", |r| r.provider_type = "4".into()),
        ("provider_tax_id", |r| r.provider_tax_id = "12.345.678/0001-99".into()),
        ("tax_regime", |r| r.tax_regime = "1".into()),
        ("description", |r| r.description = "x".repeat(501)),
    ]
}

#[test]
fn each_single_field_failure_yields_exactly_one_violation() {
    for (field, corrupt) in corruptions() {
        let mut rec = valid_record();
        corrupt(&mut rec);
        let errors = validate_record(&rec, 1, &ctx());
        assert_eq!(errors.len(), 1, "{field}: {errors:?}");
        assert_eq!(errors[0].field, field);
        assert_eq!(errors[0].record, Some(1));
    }
}

#[test]
fn address_single_field_failures() {
    let base = valid_record();
    let base = InvoiceRecord {
        city: "São Paulo".into(),
        state_code: "SP".into(),
        postal_code: "01310100".into(),
        ..base
    };
    assert!(validate_record(&base, 1, &address_ctx()).is_empty());

    let cases: [Corruption; 3] = [
        ("state_code", |r| r.state_code = "Sp".into()),
        ("postal_code", |r| r.postal_code = "1310100".into()),
        ("city", |r| r.city = " ".into()),
    ];
    for (field, corrupt) in cases {
        let mut rec = base.clone();
        corrupt(&mut rec);
        let errors = validate_record(&rec, 1, &address_ctx());
        assert_eq!(errors.len(), 1, "{field}");
        assert_eq!(errors[0].field, field);
    }
}

// --- Series rule ---

#[test]
fn blank_series_allowed_unless_issued() {
    for doc in [DocumentType::Exempt, DocumentType::NotIssued] {
        let rec = InvoiceRecord {
            document_type: doc.code().into(),
            series: "".into(),
            ..valid_record()
        };
        assert!(validate_record(&rec, 1, &ctx()).is_empty(), "{doc:?}");
    }
}

#[test]
fn issued_without_series_yields_one_series_violation() {
    let mut rec = valid_record();
    rec.document_type = DocumentType::Issued.code().into();
    rec.series = "  ".into();
    // Unrelated failures do not change the series outcome.
    rec.taxation = "X".into();
    rec.provider_tax_id = "1".into();
    let errors = validate_record(&rec, 1, &ctx());
    let series: Vec<_> = errors.iter().filter(|e| e.field == "series").collect();
    assert_eq!(series.len(), 1);
    assert!(series[0].message.contains("02"));
}

// --- Boundaries ---

#[test]
fn tax_rate_boundary() {
    let accept = |rate: &str| {
        let rec = InvoiceRecord {
            tax_rate: rate.into(),
            ..valid_record()
        };
        validate_record(&rec, 1, &ctx()).is_empty()
    };
    assert!(accept("2500"));
    assert!(accept(""));
    assert!(accept("0"));
    assert!(!accept("2501"));
    assert!(!accept("9999"));
}

#[test]
fn service_date_boundary() {
    let accept = |d: &str| {
        let rec = InvoiceRecord {
            service_date: d.into(),
            ..valid_record()
        };
        validate_record(&rec, 1, &ctx()).is_empty()
    };
    assert!(accept("20240615"));
    assert!(!accept("20240616"));
    assert!(!accept("19991231"));
    assert!(accept("20000101"));
}

#[test]
fn gross_amount_shapes() {
    let accept = |a: &str| {
        let rec = InvoiceRecord {
            gross_amount: a.into(),
            ..valid_record()
        };
        validate_record(&rec, 1, &ctx()).is_empty()
    };
    assert!(accept("10"));
    assert!(accept("10.00"));
    assert!(accept("10,00"));
    assert!(accept("0"));
    assert!(!accept("10.0"));
    assert!(!accept("1.000,00"));
    assert!(!accept("R$ 10,00"));
    assert!(!accept("-10.00"));
    assert!(!accept(""));
}

// --- Idempotence ---

#[test]
fn validation_is_idempotent() {
    let mut rec = valid_record();
    rec.series = "TOO-LONG".into();
    let batch = batch_of(vec![rec, valid_record()]);
    assert_eq!(validate_batch(&batch, &ctx()), validate_batch(&batch, &ctx()));
}

// --- ValidatedBatch gate ---

#[test]
fn validated_batch_requires_clean_batch() {
    let mut rec = valid_record();
    rec.tax_regime = "9".into();
    let err = ValidatedBatch::new(batch_of(vec![rec]), &ctx()).unwrap_err();
    let NftsError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "tax_regime");
}

#[test]
fn edit_after_validation_requires_revalidation() {
    let validated = ValidatedBatch::new(batch_of(vec![valid_record()]), &ctx()).unwrap();
    let mut batch = validated.into_inner();
    let mut edited = valid_record();
    edited.subitem = "".into();
    batch.replace(0, edited);
    assert!(ValidatedBatch::new(batch, &ctx()).is_err());
}

#[test]
fn period_spans_min_and_max_dates() {
    let dates = ["20240301", "20240105", "20240610"];
    let records = dates
        .iter()
        .map(|d| InvoiceRecord {
            service_date: (*d).into(),
            ..valid_record()
        })
        .collect();
    let validated = ValidatedBatch::new(batch_of(records), &ctx()).unwrap();
    assert_eq!(validated.period(), Some(("20240105", "20240610")));
}

#[test]
fn builder_build_validates() {
    let ok = BatchBuilder::new("41650719")
        .add_record(valid_record())
        .build(&ctx());
    assert!(ok.is_ok());

    let err = BatchBuilder::new("41650719").build(&ctx()).unwrap_err();
    assert!(err.to_string().contains("at least one record"));
}

// --- Known taxpayers ---

#[test]
fn known_taxpayers_are_valid_ids() {
    for t in KNOWN_TAXPAYERS {
        assert!(validate_taxpayer_id(t.id).is_ok());
    }
    assert_eq!(
        Taxpayer::by_id("76612740").map(Taxpayer::label).as_deref(),
        Some("7.661.274-0 – IM Matriz")
    );
}

// --- Serde ---

#[test]
fn batch_serde_roundtrip() {
    let batch = batch_of(vec![valid_record()]);
    let json = serde_json::to_string(&batch).unwrap();
    let back: Batch = serde_json::from_str(&json).unwrap();
    assert_eq!(back, batch);
}

#[test]
fn layout_variant_serde_names() {
    assert_eq!(
        serde_json::to_string(&LayoutVariant::WithAddress).unwrap(),
        "\"with_address\""
    );
    let v: LayoutVariant = serde_json::from_str("\"standard\"").unwrap();
    assert_eq!(v, LayoutVariant::Standard);
}
