//! Regression tests for GS1 element string tokenizing
//!
//! Each case pins the carrier type, decoded AIs, leftover buffer and FNC1
//! prefix for a real-world payload shape, so changes to the fixed-length
//! table or separator handling show up here first.

use gs1_parser::{Barcode, BarcodeParser, CarrierType, ParseError, Parser, ParserConfig};
use std::collections::BTreeMap;

const BASE: &str = "]d201034531200000111719112510ABCD1234";
const MARKING_CODE: &str = "010467003301005321gJk6o54AQBJfX\u{1d}2406401\u{1d}91ffd0\u{1d}92LGYcm3FRQrRdNOO+8t0pz78QTyxxBmYKhLXaAS03jKV7oy+DWGy1SeU+BZ8o7B8+hs9LvPdNA7B6NPGjrCm34A==";
const MARKING_SIGNATURE: &str =
    "LGYcm3FRQrRdNOO+8t0pz78QTyxxBmYKhLXaAS03jKV7oy+DWGy1SeU+BZ8o7B8+hs9LvPdNA7B6NPGjrCm34A==";

fn expected(
    raw: &str,
    carrier_type: CarrierType,
    ais: &[(&str, &str)],
    buffer: &[&str],
    prefix: &str,
) -> Barcode {
    let ais: BTreeMap<String, String> = ais
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let buffer = buffer.iter().map(|s| s.to_string()).collect();
    Barcode::new(raw, carrier_type, ais, buffer, prefix)
}

fn parse(config: ParserConfig, data: &str) -> Barcode {
    Parser::new(config)
        .parse(data)
        .unwrap_or_else(|err| panic!("{data:?} should parse: {err}"))
}

fn marking_config() -> ParserConfig {
    ParserConfig::default()
        .with_fnc1_required(false)
        .with_known_ais(["01", "21", "240", "91", "92"])
}

#[test]
fn test_base_default_config() {
    let barcode = parse(ParserConfig::default(), BASE);
    assert_eq!(
        barcode,
        expected(
            BASE,
            CarrierType::DataMatrix,
            &[],
            &["0103453120000011", "17191125", "10ABCD1234"],
            "]d2"
        )
    );
}

#[test]
fn test_base_with_known_ais() {
    let config = ParserConfig::default().with_known_ais(["01", "17", "10"]);
    let barcode = parse(config, BASE);
    assert_eq!(
        barcode,
        expected(
            BASE,
            CarrierType::DataMatrix,
            &[("01", "03453120000011"), ("17", "191125"), ("10", "ABCD1234")],
            &[],
            "]d2"
        )
    );
}

#[test]
fn test_very_short() {
    let barcode = parse(ParserConfig::default(), "]d21");
    assert_eq!(barcode, expected("]d21", CarrierType::DataMatrix, &[], &["1"], "]d2"));
}

#[test]
fn test_fnc1_not_required_but_present() {
    let barcode = parse(ParserConfig::default().with_fnc1_required(false), BASE);
    assert_eq!(barcode.carrier_type(), CarrierType::DataMatrix);
    assert_eq!(barcode.fnc1_prefix(), "]d2");
    assert_eq!(
        barcode.buffer(),
        ["0103453120000011", "17191125", "10ABCD1234"]
    );
}

#[test]
fn test_fnc1_not_required_and_absent() {
    let data = "01034531200000111719112510ABCD1234";
    let barcode = parse(ParserConfig::default().with_fnc1_required(false), data);
    assert_eq!(
        barcode,
        expected(
            data,
            CarrierType::Unknown,
            &[],
            &["0103453120000011", "17191125", "10ABCD1234"],
            ""
        )
    );
}

#[test]
fn test_switched_positions() {
    let data = "]d217191125010345312000001110ABCD1234";
    let barcode = parse(ParserConfig::default(), data);
    assert_eq!(
        barcode.buffer(),
        ["17191125", "0103453120000011", "10ABCD1234"]
    );

    let data = "]d210ABCD1234\u{1d}171911250103453120000011";
    let barcode = parse(ParserConfig::default(), data);
    assert_eq!(
        barcode.buffer(),
        ["10ABCD1234", "17191125", "0103453120000011"]
    );
}

#[test]
fn test_custom_separators() {
    let pipe = ParserConfig::default().with_group_separator("|").unwrap();
    let barcode = parse(pipe, "]d2010345312000001110ABCD1234|17191125");
    assert_eq!(
        barcode.buffer(),
        ["0103453120000011", "10ABCD1234", "17191125"]
    );

    let multi = ParserConfig::default().with_group_separator("<GS>").unwrap();
    let barcode = parse(multi, "]d2010345312000001110ABCD1234<GS>17191125");
    assert_eq!(
        barcode.buffer(),
        ["0103453120000011", "10ABCD1234", "17191125"]
    );
}

#[test]
fn test_marking_code_unknown_ais() {
    let barcode = parse(ParserConfig::default().with_fnc1_required(false), MARKING_CODE);
    let signature = format!("92{MARKING_SIGNATURE}");
    assert_eq!(barcode.carrier_type(), CarrierType::Unknown);
    assert!(barcode.ais().is_empty());
    assert_eq!(
        barcode.buffer(),
        [
            "0104670033010053",
            "21gJk6o54AQBJfX",
            "2406401",
            "91ffd0",
            signature.as_str(),
        ]
    );
}

#[test]
fn test_marking_code_known_ais() {
    let barcode = parse(marking_config(), MARKING_CODE);
    assert_eq!(
        barcode,
        expected(
            MARKING_CODE,
            CarrierType::Unknown,
            &[
                ("01", "04670033010053"),
                ("21", "gJk6o54AQBJfX"),
                ("240", "6401"),
                ("91", "ffd0"),
                ("92", MARKING_SIGNATURE),
            ],
            &[],
            ""
        )
    );
}

#[test]
fn test_marking_code_without_optional_ai() {
    let data = format!("010467003301005321gJk6o54AQBJfX\u{1d}91ffd0\u{1d}92{MARKING_SIGNATURE}");
    let barcode = parse(marking_config(), &data);
    assert!(!barcode.has_ai("240"));
    assert_eq!(barcode.ais().len(), 4);
    assert_eq!(barcode.ai("92"), MARKING_SIGNATURE);
    assert!(barcode.buffer().is_empty());
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let barcode = parse(ParserConfig::default(), &format!("  {BASE}\r\n"));
    assert_eq!(barcode.raw(), BASE);
}

#[test]
fn test_invalid_inputs() {
    let parser = Parser::default();
    let cases: [(&str, &str); 6] = [
        ("", "Barcode is empty"),
        (
            "01034531200000111719112510ABCD1234",
            "FNC1 sequence is not found at the start of barcode",
        ),
        ("]d2", "Barcode does not contain data"),
        ("]d2010345", "Not enough data for AI \"01\": 16 expected but 6 exists"),
        (
            "]d20103453\u{1d}200000111719112510ABCD1234",
            "Group separator was not expected in AI \"0103453\u{1d}20000011\"",
        ),
        (
            "]d2010 3`5'1200000111719112510ABCD123",
            "Value contains invalid characters: \" \", \"`\"",
        ),
    ];

    for (data, message) in cases {
        let err = parser
            .parse(data)
            .expect_err(&format!("{data:?} should fail"));
        assert_eq!(err.to_string(), message, "input {data:?}");
    }
}

#[test]
fn test_insufficient_length_fields() {
    let err = Parser::default().parse("]d2010345").unwrap_err();
    assert_eq!(
        err,
        ParseError::InsufficientLength {
            code: "01".to_string(),
            expected: 16,
            actual: 6
        }
    );
}

#[test]
fn test_earlier_field_error_wins() {
    // bad characters in the first field are reported before the short second one
    let err = Parser::default().parse("]d210A B\u{1d}0100").unwrap_err();
    assert_eq!(err, ParseError::InvalidCharacters { chars: vec![' '] });
}
