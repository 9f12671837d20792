//! Column schemas, typed values and parsed records.
//!
//! A [`Schema`] is an ordered set of [`ColumnSchema`] descriptors keyed by
//! header name. The parser uses it to coerce raw text into [`Value`]s and to
//! validate each [`Record`] it produces.

use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;

/// The declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    String,
    Number,
    Integer,
    Float,
    Boolean,
    Date,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
}

impl Value {
    /// Numeric view of the value; integers widen to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Null or empty text. Such values are skipped by constraint checks.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Type and constraints of one column.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub kind: ColumnKind,
    pub required: bool,
    pub default: Option<Value>,
    pub nullable: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub allowed: Option<Vec<String>>,
}

impl ColumnSchema {
    #[must_use]
    pub fn new(kind: ColumnKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            nullable: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            allowed: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn one_of(mut self, allowed: &[&str]) -> Self {
        self.allowed = Some(allowed.iter().map(ToString::to_string).collect());
        self
    }
}

/// Ordered column definitions for one data domain.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: IndexMap<String, ColumnSchema>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn column(mut self, name: &str, column: ColumnSchema) -> Self {
        self.columns.insert(name.to_string(), column);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnSchema)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), col))
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        self.columns()
            .filter(|(_, col)| col.required)
            .map(|(name, _)| name)
    }
}

/// One parsed row, keyed by header in header order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.fields.insert(column.into(), value);
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.insert(column, value.into());
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Text of a column, or `""` when missing or not text.
    #[must_use]
    pub fn text(&self, column: &str) -> &str {
        self.get(column).and_then(Value::as_str).unwrap_or_default()
    }

    #[must_use]
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn player_name() -> ColumnSchema {
    ColumnSchema::new(ColumnKind::String).required().min_length(1)
}

fn team() -> ColumnSchema {
    ColumnSchema::new(ColumnKind::String).required().min_length(2)
}

fn age() -> ColumnSchema {
    ColumnSchema::new(ColumnKind::Integer)
        .required()
        .min(18.0)
        .max(50.0)
}

fn counting_stat(kind: ColumnKind) -> ColumnSchema {
    ColumnSchema::new(kind).required().min(0.0)
}

#[must_use]
pub fn mlb_player() -> Schema {
    Schema::new()
        .column("Player", player_name())
        .column(
            "League",
            ColumnSchema::new(ColumnKind::String)
                .required()
                .one_of(&["AL", "NL"]),
        )
        .column("Team", team())
        .column("Age", age())
        .column("Runs", counting_stat(ColumnKind::Integer))
        .column("SB", counting_stat(ColumnKind::Integer))
        .column("HR", counting_stat(ColumnKind::Integer))
        .column(
            "OPS",
            ColumnSchema::new(ColumnKind::Float)
                .required()
                .min(0.0)
                .max(2.0),
        )
}

#[must_use]
pub fn nfl_player() -> Schema {
    Schema::new()
        .column("Player", player_name())
        .column("Age", age())
        .column(
            "Conference",
            ColumnSchema::new(ColumnKind::String)
                .required()
                .one_of(&["AFC", "NFC"]),
        )
        .column("Team", team())
        .column("Position", ColumnSchema::new(ColumnKind::String).required())
        .column("Rec Yds", counting_stat(ColumnKind::Integer))
        .column("Rush Yds", counting_stat(ColumnKind::Integer))
        .column("TDs", counting_stat(ColumnKind::Integer))
}

#[must_use]
pub fn nba_player() -> Schema {
    Schema::new()
        .column("Player", player_name())
        .column(
            "Conference",
            ColumnSchema::new(ColumnKind::String)
                .required()
                .one_of(&["Eastern", "Western"]),
        )
        .column("Team", team())
        .column("Position", ColumnSchema::new(ColumnKind::String).required())
        .column("Age", age())
        .column("PTS", counting_stat(ColumnKind::Float))
        .column("REB", counting_stat(ColumnKind::Float))
        .column("AST", counting_stat(ColumnKind::Float))
}
