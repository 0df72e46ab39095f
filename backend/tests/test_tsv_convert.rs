use stotra_backend::tsv_import::{HeaderIndex, REQUIRED_COLS, convert_row, parse_verses_tsv};
use stotra_backend::types::ConvertError;

static HEADER: &str = "id\ttitle\tmeter\tfull\tp1\tp2\tp3\tp4\tpr_p1\tpr_p2\tpr_p3\tpr_p4\tneeds_split_practice\thas_p12\thas_p34\tartha_sa\tmeaning_en";

/// Build a TSV data row in canonical column order.
fn row(fields: [&str; 17]) -> String {
    fields.join("\t")
}

fn minimal_row(id: &str) -> String {
    row([id, "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", ""])
}

#[test]
fn converts_a_full_row() {
    let data = row([
        "ns1",
        "Nītiśatakam 1",
        "Śārdūlavikrīḍita",
        "दिक्कालाद्यनवच्छिन्नानन्तचिन्मात्रमूर्तये",
        "दिक्कालाद्यनवच्छिन्न-",
        "आनन्तचिन्मात्रमूर्तये",
        "स्वानुभूत्येकमानाय",
        "नमः शान्ताय तेजसे",
        "दिक् काला",
        "",
        "",
        "",
        "false",
        "true",
        "true",
        "दिक्कालादिभिः अनवच्छिन्ना...",
        "Salutations to the calm radiance...",
    ]);
    let tsv = format!("{}\n{}", HEADER, data);

    let verses = parse_verses_tsv(&tsv).unwrap();
    assert_eq!(verses.len(), 1);

    let v = &verses[0];
    assert_eq!(v.id, "ns1");
    assert_eq!(v.title, "Nītiśatakam 1");
    assert_eq!(v.meter, "Śārdūlavikrīḍita");
    assert_eq!(v.full, "दिक्कालाद्यनवच्छिन्नानन्तचिन्मात्रमूर्तये");
    assert_eq!(v.text.p1, "दिक्कालाद्यनवच्छिन्न-");
    // pr_p1 was given, pr_p2..pr_p4 fall back to the canonical text
    assert_eq!(v.practice.p1, "दिक् काला");
    assert_eq!(v.practice.p2, v.text.p2);
    assert_eq!(v.practice.p3, v.text.p3);
    assert_eq!(v.practice.p4, v.text.p4);
    assert!(!v.needs_split_practice);
    assert!(v.available.p12);
    assert!(v.available.p34);
    assert_eq!(v.gloss.sa, "दिक्कालादिभिः अनवच्छिन्ना...");
    assert_eq!(v.gloss.en, "Salutations to the calm radiance...");
}

#[test]
fn title_and_meter_default_when_blank() {
    let tsv = format!("{}\n{}", HEADER, minimal_row("ns2"));

    let verses = parse_verses_tsv(&tsv).unwrap();
    let v = &verses[0];
    assert_eq!(v.title, "ns2");
    assert_eq!(v.meter, "—");
    assert_eq!(v.full, "");
    assert_eq!(v.text.p1, "");
    assert_eq!(v.practice.p1, "");
}

#[test]
fn audio_filenames_derive_from_id_and_availability() {
    let data = row([
        "verse7", "", "", "", "", "", "", "", "", "", "", "", "", "true", "false", "", "",
    ]);
    let tsv = format!("{}\n{}", HEADER, data);

    let verses = parse_verses_tsv(&tsv).unwrap();
    let audio = &verses[0].audio;
    assert_eq!(audio.p1, "verse7_p1.mp3");
    assert_eq!(audio.p2, "verse7_p2.mp3");
    assert_eq!(audio.p3, "verse7_p3.mp3");
    assert_eq!(audio.p4, "verse7_p4.mp3");
    assert_eq!(audio.p12, Some("verse7_p12.mp3".to_string()));
    assert_eq!(audio.p34, None);
    assert_eq!(audio.full, "verse7_full.mp3");
}

#[test]
fn boolean_tokens_parse_case_insensitively() {
    let mut lines = vec![HEADER.to_string()];
    for (i, token) in ["TRUE", "Yes", "1", "y", "", "false", "no", "maybe"]
        .iter()
        .enumerate()
    {
        let id = format!("v{}", i);
        lines.push(row([
            &id, "", "", "", "", "", "", "", "", "", "", "", token, token, "", "", "",
        ]));
    }
    let tsv = lines.join("\n");

    let verses = parse_verses_tsv(&tsv).unwrap();
    assert_eq!(verses.len(), 8);
    for v in &verses[0..4] {
        assert!(v.needs_split_practice, "expected true: {}", v.id);
        assert!(v.available.p12);
    }
    for v in &verses[4..8] {
        assert!(!v.needs_split_practice, "expected false: {}", v.id);
        assert!(!v.available.p12);
    }
}

#[test]
fn rows_with_blank_id_are_skipped() {
    let tsv = format!(
        "{}\n{}\n{}\n{}\n{}",
        HEADER,
        minimal_row("ns1"),
        minimal_row(""),
        minimal_row("   "),
        minimal_row("ns4"),
    );

    let verses = parse_verses_tsv(&tsv).unwrap();
    let ids: Vec<&str> = verses.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["ns1", "ns4"]);
}

#[test]
fn row_order_is_preserved_and_duplicates_kept() {
    let tsv = format!(
        "{}\n{}\n{}\n{}",
        HEADER,
        minimal_row("b"),
        minimal_row("a"),
        minimal_row("b"),
    );

    let verses = parse_verses_tsv(&tsv).unwrap();
    let ids: Vec<&str> = verses.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "b"]);
}

#[test]
fn field_values_are_trimmed() {
    let data = row([
        "  ns1  ", " Title ", "", "", " p1 text ", "", "", "", "", "", "", "", "", "", "", "", "",
    ]);
    let tsv = format!("{}\n{}", HEADER, data);

    let verses = parse_verses_tsv(&tsv).unwrap();
    let v = &verses[0];
    assert_eq!(v.id, "ns1");
    assert_eq!(v.title, "Title");
    assert_eq!(v.text.p1, "p1 text");
    assert_eq!(v.audio.full, "ns1_full.mp3");
}

#[test]
fn extra_columns_and_reordered_header_are_accepted() {
    let header = "comment\tmeaning_en\tartha_sa\thas_p34\thas_p12\tneeds_split_practice\tpr_p4\tpr_p3\tpr_p2\tpr_p1\tp4\tp3\tp2\tp1\tfull\tmeter\ttitle\tid";
    let data = "ignored\ten gloss\tsa gloss\tfalse\ttrue\tfalse\t\t\t\t\t\t\t\t\t\t\t\tns9";
    let tsv = format!("{}\n{}", header, data);

    let verses = parse_verses_tsv(&tsv).unwrap();
    let v = &verses[0];
    assert_eq!(v.id, "ns9");
    assert_eq!(v.gloss.en, "en gloss");
    assert!(v.available.p12);
    assert!(!v.available.p34);
}

#[test]
fn short_rows_read_missing_fields_as_empty() {
    let header = HeaderIndex::parse(HEADER);
    header.validate().unwrap();

    // Only id and title present
    let fields: Vec<&str> = "ns3\tShort row".split('\t').collect();
    let v = convert_row(&header, &fields).unwrap();
    assert_eq!(v.id, "ns3");
    assert_eq!(v.title, "Short row");
    assert_eq!(v.full, "");
    assert!(!v.needs_split_practice);
    assert_eq!(v.audio.p12, None);
}

#[test]
fn missing_columns_is_a_fatal_schema_error() {
    let header = "id\ttitle\tmeter";
    let tsv = format!("{}\nns1\tTitle\t—", header);

    let err = parse_verses_tsv(&tsv).unwrap_err();
    let err = err.downcast::<ConvertError>().unwrap();
    match err {
        ConvertError::MissingColumns { missing, found } => {
            assert!(missing.contains("full"));
            assert!(missing.contains("meaning_en"));
            assert!(!missing.contains("id"));
            assert_eq!(found, "id, title, meter");
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn missing_column_error_names_every_absent_column() {
    let tsv = HEADER.replace("\tmeaning_en", "");

    let err = parse_verses_tsv(&tsv).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Missing required columns in TSV: meaning_en"));
    assert!(msg.contains("Found columns:"));
}

#[test]
fn empty_input_has_no_header_row() {
    let err = parse_verses_tsv("").unwrap_err();
    let err = err.downcast::<ConvertError>().unwrap();
    assert_eq!(err, ConvertError::NoHeader);
}

#[test]
fn header_only_input_yields_no_records() {
    let verses = parse_verses_tsv(HEADER).unwrap();
    assert!(verses.is_empty());

    // Trailing newline and blank lines are also fine
    let verses = parse_verses_tsv(&format!("{}\n\n\n", HEADER)).unwrap();
    assert!(verses.is_empty());
}

#[test]
fn required_cols_match_the_canonical_header() {
    let header = HeaderIndex::parse(HEADER);
    assert!(header.validate().is_ok());
    assert_eq!(REQUIRED_COLS.len(), 17);
}
