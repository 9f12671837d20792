//! Schema-aware CSV parsing.
//!
//! Parsing is line oriented: the text is split on any line ending, the first
//! line is the header row and every following line becomes one [`Record`].
//! Quoted fields may contain the delimiter and doubled quotes, but not line
//! breaks.

use crate::error::{ParseError, RowError, Violation};
use crate::schema::{ColumnKind, ColumnSchema, Record, Schema, Value};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub delimiter: char,
    pub quote: char,
    pub trim_values: bool,
    pub skip_empty_lines: bool,
    pub validate_headers: bool,
    /// Abort on the first bad row instead of skipping it.
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            trim_values: true,
            skip_empty_lines: true,
            validate_headers: true,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    options: ParseOptions,
}

impl CsvParser {
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse `text` into records, coercing and validating against `schema`
    /// when one is given.
    ///
    /// # Errors
    /// `ParseError::Input` for empty text or an empty header row,
    /// `ParseError::MissingHeaders` when required schema columns are absent,
    /// and `ParseError::Row` for the first bad row in strict mode.
    pub fn parse(&self, text: &str, schema: Option<&Schema>) -> Result<Vec<Record>, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Input("empty CSV text"));
        }

        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let lines = split_lines(text);
        let headers = self.split_fields(lines[0]);
        if headers.iter().all(String::is_empty) {
            return Err(ParseError::Input("no headers found"));
        }

        if let Some(schema) = schema
            && self.options.validate_headers
        {
            validate_headers(&headers, schema)?;
        }

        let mut records = Vec::with_capacity(lines.len() - 1);
        for (index, line) in lines.iter().enumerate().skip(1) {
            let line_number = index + 1;
            if self.options.skip_empty_lines && line.trim().is_empty() {
                continue;
            }

            let values = self.split_fields(line);
            if values.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            match build_record(&headers, &values, schema) {
                Ok(record) => records.push(record),
                Err(source) => {
                    log::warn!("Error parsing line {line_number}: {source}");
                    if self.options.strict {
                        return Err(ParseError::Row {
                            line: line_number,
                            source,
                        });
                    }
                }
            }
        }

        log::debug!(
            "Parsed {} records from {} lines",
            records.len(),
            lines.len()
        );
        Ok(records)
    }

    /// Split one line into fields, honouring the quote character.
    #[must_use]
    pub fn split_fields(&self, line: &str) -> Vec<String> {
        let ParseOptions {
            delimiter, quote, ..
        } = self.options;
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if c == quote {
                if in_quotes && chars.peek() == Some(&quote) {
                    current.push(quote);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if c == delimiter && !in_quotes {
                fields.push(self.finish_field(&mut current));
            } else {
                current.push(c);
            }
        }
        fields.push(self.finish_field(&mut current));
        fields
    }

    fn finish_field(&self, current: &mut String) -> String {
        let field = std::mem::take(current);
        if self.options.trim_values {
            field.trim().to_string()
        } else {
            field
        }
    }
}

/// Split on `\r\n`, `\r` or `\n`. A trailing line ending yields a final empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}

fn validate_headers(headers: &[String], schema: &Schema) -> Result<(), ParseError> {
    let missing: Vec<String> = schema
        .required_columns()
        .filter(|required| !headers.iter().any(|h| h == required))
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParseError::MissingHeaders(missing))
    }
}

fn build_record(
    headers: &[String],
    values: &[String],
    schema: Option<&Schema>,
) -> Result<Record, RowError> {
    let mut record = Record::new();
    for (index, header) in headers.iter().enumerate() {
        let raw = values.get(index).map_or("", String::as_str);
        let value = match schema.and_then(|s| s.get(header)) {
            Some(column) => coerce(header, raw, column)?,
            None => Value::Text(raw.to_string()),
        };
        record.insert(header.clone(), value);
    }

    if let Some(schema) = schema {
        validate_record(&record, schema)?;
    }
    Ok(record)
}

/// Convert raw field text into the column's declared type.
///
/// # Errors
/// `RowError::RequiredField` for an empty required field without a default,
/// `RowError::InvalidValue` for unparseable input in a required column.
pub fn coerce(column: &str, raw: &str, schema: &ColumnSchema) -> Result<Value, RowError> {
    if raw.is_empty() {
        if let Some(default) = &schema.default {
            return Ok(default.clone());
        }
        if schema.required {
            return Err(RowError::RequiredField {
                column: column.to_string(),
            });
        }
        return Ok(if schema.nullable {
            Value::Null
        } else {
            Value::Text(String::new())
        });
    }

    let invalid = || RowError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
        kind: schema.kind,
    };
    let fallback = |zero: Value| {
        if schema.required {
            Err(invalid())
        } else {
            Ok(schema.default.clone().unwrap_or(zero))
        }
    };

    match schema.kind {
        ColumnKind::String => Ok(Value::Text(raw.to_string())),
        ColumnKind::Number => match raw.trim().parse::<f64>() {
            Ok(n) if !n.is_nan() => Ok(Value::Float(n)),
            _ => fallback(Value::Float(0.0)),
        },
        ColumnKind::Float => match leading_float(raw) {
            Some(n) => Ok(Value::Float(n)),
            None => fallback(Value::Float(0.0)),
        },
        ColumnKind::Integer => match leading_integer(raw) {
            Some(n) => Ok(Value::Integer(n)),
            None => fallback(Value::Integer(0)),
        },
        ColumnKind::Boolean => Ok(Value::Boolean(
            TRUTHY.contains(&raw.to_lowercase().as_str()),
        )),
        ColumnKind::Date => match parse_date(raw.trim()) {
            Some(date) => Ok(Value::Date(date)),
            None if schema.required => Err(invalid()),
            None => Ok(Value::Null),
        },
    }
}

fn validate_record(record: &Record, schema: &Schema) -> Result<(), RowError> {
    for (column, constraints) in schema.columns() {
        let value = record.get(column);
        match value {
            None => {
                if constraints.required {
                    return Err(RowError::RequiredField {
                        column: column.to_string(),
                    });
                }
            }
            Some(v) if v.is_blank() => {
                if constraints.required {
                    return Err(RowError::RequiredField {
                        column: column.to_string(),
                    });
                }
            }
            Some(v) => check_constraints(column, v, constraints)?,
        }
    }
    Ok(())
}

fn check_constraints(column: &str, value: &Value, schema: &ColumnSchema) -> Result<(), RowError> {
    let violation = |violation: Violation| RowError::Validation {
        column: column.to_string(),
        value: value.to_string(),
        violation,
    };

    if let Some(n) = value.as_f64() {
        if let Some(min) = schema.min
            && n < min
        {
            return Err(violation(Violation::BelowMinimum(min)));
        }
        if let Some(max) = schema.max
            && n > max
        {
            return Err(violation(Violation::AboveMaximum(max)));
        }
    }

    if let Some(text) = value.as_str() {
        let len = text.chars().count();
        if let Some(min) = schema.min_length
            && len < min
        {
            return Err(violation(Violation::TooShort(min)));
        }
        if let Some(max) = schema.max_length
            && len > max
        {
            return Err(violation(Violation::TooLong(max)));
        }
        if let Some(pattern) = &schema.pattern
            && !pattern.is_match(text)
        {
            return Err(violation(Violation::PatternMismatch(
                pattern.as_str().to_string(),
            )));
        }
    }

    if let Some(allowed) = &schema.allowed {
        let shown = value.to_string();
        if !allowed.iter().any(|a| *a == shown) {
            return Err(violation(Violation::NotAllowed(allowed.clone())));
        }
    }
    Ok(())
}

/// Longest leading base-10 integer, e.g. `"27.5"` -> 27. Out-of-range digit
/// runs saturate at the `i64` bounds.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    match s[..end].parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if bytes[0] == b'-' => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Longest leading decimal number, e.g. `"0.850 OPS"` -> 0.85.
fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{self, ColumnKind, ColumnSchema, Schema};
    use proptest::prelude::*;
    use regex::Regex;

    const MLB_CSV: &str = "Player,League,Team,Age,Runs,SB,HR,OPS\n\
        Aaron Judge,AL,NYY,33,137,12,53,1.145\n\
        Shohei Ohtani,NL,LAD,31,146,20,55,1.014\n";

    fn parser() -> CsvParser {
        CsvParser::default()
    }

    fn strict() -> CsvParser {
        CsvParser::new(ParseOptions {
            strict: true,
            ..ParseOptions::default()
        })
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_fields_quotes() {
        let p = parser();
        assert_eq!(
            p.split_fields(r#"a,"b,c","say ""hi""""#),
            vec!["a", "b,c", r#"say "hi""#]
        );
        assert_eq!(p.split_fields(" a , b ,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_fields_without_trim() {
        let p = CsvParser::new(ParseOptions {
            trim_values: false,
            ..ParseOptions::default()
        });
        assert_eq!(p.split_fields(" a ,b"), vec![" a ", "b"]);
    }

    #[test]
    fn test_custom_delimiter_and_quote() {
        let p = CsvParser::new(ParseOptions {
            delimiter: ';',
            quote: '\'',
            ..ParseOptions::default()
        });
        assert_eq!(p.split_fields("x;'y;z';'it''s'"), vec!["x", "y;z", "it's"]);
    }

    #[test]
    fn test_parse_without_schema_keeps_text() {
        let records = parser().parse("Name,Age\nAlice,30\n", None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Age"), Some(&Value::from("30")));
    }

    #[test]
    fn test_parse_mlb_schema_types() {
        let records = parser().parse(MLB_CSV, Some(&schema::mlb_player())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Age"), Some(&Value::Integer(33)));
        assert_eq!(records[1].text("Player"), "Shohei Ohtani");
        let ops = records[0].number("OPS").unwrap();
        assert!((ops - 1.145).abs() < 1e-9);
    }

    #[test]
    fn test_integer_and_float_coercion() {
        let int = ColumnSchema::new(ColumnKind::Integer);
        let float = ColumnSchema::new(ColumnKind::Float);
        assert_eq!(coerce("Age", "27", &int).unwrap(), Value::Integer(27));
        assert_eq!(coerce("Age", "27.9", &int).unwrap(), Value::Integer(27));
        match coerce("OPS", "0.850", &float).unwrap() {
            Value::Float(n) => assert!((n - 0.85).abs() < 1e-9),
            other => panic!("Expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let text = format!("\u{FEFF}{MLB_CSV}");
        let records = parser().parse(&text, Some(&schema::mlb_player())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("Player"), "Aaron Judge");
        assert!(records[0].get("\u{FEFF}Player").is_none());
    }

    #[test]
    fn test_integer_overflow_saturates() {
        let int = ColumnSchema::new(ColumnKind::Integer);
        assert_eq!(
            coerce("N", "99999999999999999999", &int).unwrap(),
            Value::Integer(i64::MAX)
        );
        assert_eq!(
            coerce("N", "-99999999999999999999", &int).unwrap(),
            Value::Integer(i64::MIN)
        );

        let records = parser()
            .parse("N\n99999999999999999999\n", Some(&Schema::new().column("N", int)))
            .unwrap();
        assert_eq!(records[0].get("N"), Some(&Value::Integer(i64::MAX)));
    }

    #[test]
    fn test_invalid_number_falls_back() {
        let optional = ColumnSchema::new(ColumnKind::Number);
        assert_eq!(coerce("X", "abc", &optional).unwrap(), Value::Float(0.0));

        let with_default = ColumnSchema::new(ColumnKind::Integer).default_value(7_i64);
        assert_eq!(coerce("X", "abc", &with_default).unwrap(), Value::Integer(7));

        let required = ColumnSchema::new(ColumnKind::Float).required();
        assert!(matches!(
            coerce("X", "abc", &required),
            Err(RowError::InvalidValue { kind: ColumnKind::Float, .. })
        ));
    }

    #[test]
    fn test_number_requires_full_parse() {
        let number = ColumnSchema::new(ColumnKind::Number);
        assert_eq!(coerce("X", "12abc", &number).unwrap(), Value::Float(0.0));
        assert_eq!(coerce("X", "1e3", &number).unwrap(), Value::Float(1000.0));
    }

    #[test]
    fn test_empty_value_rules() {
        let with_default = ColumnSchema::new(ColumnKind::Integer)
            .required()
            .default_value(0_i64);
        assert_eq!(coerce("SB", "", &with_default).unwrap(), Value::Integer(0));

        let required = ColumnSchema::new(ColumnKind::Integer).required();
        assert_eq!(
            coerce("SB", "", &required),
            Err(RowError::RequiredField {
                column: "SB".to_string()
            })
        );

        let nullable = ColumnSchema::new(ColumnKind::Integer).nullable();
        assert_eq!(coerce("SB", "", &nullable).unwrap(), Value::Null);

        let plain = ColumnSchema::new(ColumnKind::Integer);
        assert_eq!(coerce("SB", "", &plain).unwrap(), Value::from(""));
    }

    #[test]
    fn test_boolean_coercion() {
        let col = ColumnSchema::new(ColumnKind::Boolean);
        for truthy in ["true", "TRUE", "1", "Yes", "on"] {
            assert_eq!(coerce("B", truthy, &col).unwrap(), Value::Boolean(true));
        }
        for falsy in ["false", "0", "no", "maybe"] {
            assert_eq!(coerce("B", falsy, &col).unwrap(), Value::Boolean(false));
        }
    }

    #[test]
    fn test_date_coercion() {
        let col = ColumnSchema::new(ColumnKind::Date);
        let expected = NaiveDate::from_ymd_opt(2025, 3, 27).unwrap();
        assert_eq!(coerce("D", "2025-03-27", &col).unwrap(), Value::Date(expected));
        assert_eq!(coerce("D", "03/27/2025", &col).unwrap(), Value::Date(expected));
        assert_eq!(
            coerce("D", "2025-03-27T19:05:00Z", &col).unwrap(),
            Value::Date(expected)
        );
        assert_eq!(coerce("D", "opening day", &col).unwrap(), Value::Null);
        assert!(coerce("D", "opening day", &col.clone().required()).is_err());
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(parser().parse("", None), Err(ParseError::Input("empty CSV text")));
        assert_eq!(
            parser().parse(" , \n", None),
            Err(ParseError::Input("no headers found"))
        );
    }

    #[test]
    fn test_missing_headers_lists_all() {
        let err = parser()
            .parse("Player,Team\nAaron Judge,NYY\n", Some(&schema::mlb_player()))
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingHeaders(vec![
                "League".to_string(),
                "Age".to_string(),
                "Runs".to_string(),
                "SB".to_string(),
                "HR".to_string(),
                "OPS".to_string(),
            ])
        );
        assert!(err.to_string().contains("League, Age"));
    }

    #[test]
    fn test_header_validation_can_be_disabled() {
        let p = CsvParser::new(ParseOptions {
            validate_headers: false,
            ..ParseOptions::default()
        });
        // Rows still fail validation, so they are skipped rather than erroring.
        let records = p
            .parse("Player,Team\nAaron Judge,NYY\n", Some(&schema::mlb_player()))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_non_strict_skips_bad_rows() {
        let csv = "Player,League,Team,Age,Runs,SB,HR,OPS\n\
            Aaron Judge,AL,NYY,33,137,12,53,1.145\n\
            Nobody,XL,NYY,33,1,1,1,0.500\n\
            Cal Raleigh,AL,SEA,,110,14,60,0.948\n\
            Shohei Ohtani,NL,LAD,31,146,20,55,1.014\n";
        let records = parser().parse(csv, Some(&schema::mlb_player())).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.text("Player")).collect();
        assert_eq!(names, vec!["Aaron Judge", "Shohei Ohtani"]);
    }

    #[test]
    fn test_strict_reports_line_and_column() {
        let csv = "Player,League,Team,Age,Runs,SB,HR,OPS\n\
            Aaron Judge,AL,NYY,33,137,12,53,1.145\n\
            Old Timer,AL,NYY,61,1,1,1,0.500\n";
        let err = strict().parse(csv, Some(&schema::mlb_player())).unwrap_err();
        match err {
            ParseError::Row { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source.column(), "Age");
                assert_eq!(
                    source,
                    RowError::Validation {
                        column: "Age".to_string(),
                        value: "61".to_string(),
                        violation: Violation::AboveMaximum(50.0),
                    }
                );
            }
            other => panic!("Expected row error, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_required_field() {
        let csv = "Player,League,Team,Age,Runs,SB,HR,OPS\n\
            Cal Raleigh,AL,SEA,28,110,,60,0.948\n";
        let err = strict().parse(csv, Some(&schema::mlb_player())).unwrap_err();
        assert_eq!(
            err,
            ParseError::Row {
                line: 2,
                source: RowError::RequiredField {
                    column: "SB".to_string()
                }
            }
        );
    }

    #[test]
    fn test_default_substituted_for_missing_value() {
        let schema = Schema::new()
            .column("Player", ColumnSchema::new(ColumnKind::String).required())
            .column(
                "SB",
                ColumnSchema::new(ColumnKind::Integer)
                    .required()
                    .default_value(0_i64),
            );
        let records = strict().parse("Player,SB\nCal Raleigh,\n", Some(&schema)).unwrap();
        assert_eq!(records[0].get("SB"), Some(&Value::Integer(0)));
    }

    #[test]
    fn test_length_pattern_and_enum_constraints() {
        let schema = Schema::new()
            .column(
                "Code",
                ColumnSchema::new(ColumnKind::String)
                    .min_length(2)
                    .max_length(3)
                    .pattern(Regex::new("^[A-Z]+$").unwrap()),
            )
            .column("Hand", ColumnSchema::new(ColumnKind::String).one_of(&["L", "R", "S"]));
        let p = strict();

        let too_short = p.parse("Code,Hand\nN,L\n", Some(&schema)).unwrap_err();
        assert!(matches!(
            too_short,
            ParseError::Row {
                source: RowError::Validation { violation: Violation::TooShort(2), .. },
                ..
            }
        ));

        let too_long = p.parse("Code,Hand\nNYYY,L\n", Some(&schema)).unwrap_err();
        assert!(too_long.to_string().contains("longer than 3"));

        let pattern = p.parse("Code,Hand\nny,L\n", Some(&schema)).unwrap_err();
        assert!(pattern.to_string().contains("doesn't match pattern"));

        let not_allowed = p.parse("Code,Hand\nNY,X\n", Some(&schema)).unwrap_err();
        assert!(not_allowed.to_string().contains("is not one of [L, R, S]"));

        let ok = p.parse("Code,Hand\nNYY,S\n", Some(&schema)).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_blank_and_empty_rows_skipped() {
        let csv = "A,B\n\n1,2\n , \n   \n3,4\n";
        let records = parser().parse(csv, None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("A"), "3");
    }

    #[test]
    fn test_short_rows_padded_with_empty() {
        let records = parser().parse("A,B,C\n1\n", None).unwrap();
        assert_eq!(records[0].text("B"), "");
        assert_eq!(records[0].text("C"), "");
    }

    #[test]
    fn test_unknown_columns_kept_as_text() {
        let csv = "Player,League,Team,Age,Runs,SB,HR,OPS,Notes\n\
            Aaron Judge,AL,NYY,33,137,12,53,1.145,\"Captain, RF\"\n";
        let records = parser().parse(csv, Some(&schema::mlb_player())).unwrap();
        assert_eq!(records[0].text("Notes"), "Captain, RF");
    }

    fn quote(field: &str) -> String {
        format!("\"{}\"", field.replace('"', "\"\""))
    }

    proptest! {
        #[test]
        fn prop_one_record_per_row_in_order(names in prop::collection::vec("[a-zA-Z ,\"]{0,12}", 0..25)) {
            let mut csv = String::from("Name,Index\n");
            for (i, name) in names.iter().enumerate() {
                csv.push_str(&format!("{},{}\r\n", quote(name), i));
            }
            let records = parser().parse(&csv, None).unwrap();
            prop_assert_eq!(records.len(), names.len());
            for (i, (record, name)) in records.iter().zip(&names).enumerate() {
                prop_assert_eq!(record.text("Name"), name.trim());
                let index = i.to_string();
                prop_assert_eq!(record.text("Index"), index.as_str());
            }
        }

        #[test]
        fn prop_integer_column_round_trips(n in -100_000i64..100_000) {
            let schema = Schema::new().column("N", ColumnSchema::new(ColumnKind::Integer).required());
            let records = strict().parse(&format!("N\n{n}\n"), Some(&schema)).unwrap();
            prop_assert_eq!(records[0].get("N"), Some(&Value::Integer(n)));
        }
    }
}
