use chrono::NaiveDate;
use nfts::classification::ClassificationTable;
use nfts::core::*;
use nfts::layout;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let table = ClassificationTable::from_json(
        r#"[
            {"classificacao": "1.07", "aliquota": "2,90", "cnae": "1402"},
            {"classificacao": "7.10", "aliquota": "2,00", "cnae": "8121"}
        ]"#,
    )
    .expect("rate table");

    // Service code pre-filled from the subitem, as a data-entry form would
    let maintenance = table.on_field_change("0107").unwrap_or_default();
    let cleaning = table.on_field_change("0710").unwrap_or_default();

    let rec1 = InvoiceRecordBuilder::new("1523", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .document_type(DocumentType::Issued)
        .series("A")
        .service(maintenance, "0107")
        .gross_amount("1500.00")
        .tax_rate("290")
        .provider(ProviderType::Company, "12345678000199")
        .description("Manutenção de sistemas\nreferente a março/2024")
        .build();

    let rec2 = InvoiceRecordBuilder::new("87", NaiveDate::from_ymd_opt(2024, 3, 28).unwrap())
        .service(cleaning, "0710")
        .gross_amount("320,50")
        .withheld_at_source(true)
        .provider(ProviderType::Company, "98765432000110")
        .tax_regime(TaxRegime::SimplesNacionalDas)
        .description("Limpeza de escritório")
        .build();

    // A record with mistakes, to show what validation reports
    let mut broken = rec2.clone();
    broken.provider_tax_id = "98.765.432/0001-10".into();
    broken.gross_amount = "1.000,00".into();

    let ctx = ValidationContext::new(LayoutVariant::Standard);
    let taxpayer = Taxpayer::by_id("41650719").expect("known taxpayer");
    println!("Taxpayer: {}", taxpayer.label());

    let draft = BatchBuilder::new(taxpayer.id)
        .add_record(rec1.clone())
        .add_record(broken)
        .build_unchecked();
    println!("\n=== Validation ===");
    for error in validate_batch(&draft, &ctx) {
        println!("  {error}");
    }

    let batch = BatchBuilder::new(taxpayer.id)
        .add_record(rec1)
        .add_record(rec2)
        .build(&ctx)
        .expect("batch valid");

    let text = layout::encode(&batch).expect("encoding failed");
    println!("\n=== NFTS file ===");
    for (i, line) in text.lines().enumerate() {
        println!("Line {}: {}", i + 1, &line[..80.min(line.len())]);
    }
    println!("... ({} characters total)", text.chars().count());
}
