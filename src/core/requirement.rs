//! Requirement types and the shared parsing contract.
//!
//! A validator classifies each requirement it is handed; the raw attribute
//! text is then converted once, at discovery time, into a typed
//! [`Requirement`].

use super::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a requirement value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementType {
    #[default]
    String,
    Integer,
    #[serde(alias = "number")]
    Float,
    Boolean,
    Regex,
    Range,
}

impl RequirementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Regex => "regex",
            Self::Range => "range",
        }
    }

    /// Convert a raw requirement value according to this type.
    pub fn parse(&self, raw: &str) -> Result<Requirement, ParseError> {
        match self {
            Self::String => Ok(Requirement::String(raw.to_string())),
            Self::Integer => parse_integer(raw).map(Requirement::Integer),
            Self::Float => Ok(Requirement::Float(parse_float(raw))),
            Self::Boolean => Ok(Requirement::Boolean(parse_boolean(raw))),
            Self::Regex => Regex::new(raw)
                .map(Requirement::Regex)
                .map_err(|e| ParseError::InvalidRegex {
                    pattern: raw.to_string(),
                    reason: e.to_string(),
                }),
            Self::Range => parse_range(raw).map(Requirement::Range),
        }
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementType {
    type Err = ParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "number" => Ok(Self::Float),
            "boolean" | "bool" => Ok(Self::Boolean),
            "regex" | "regexp" => Ok(Self::Regex),
            "range" => Ok(Self::Range),
            _ => Err(ParseError::UnsupportedType {
                tag: tag.to_string(),
            }),
        }
    }
}

/// Inclusive numeric bounds parsed from `"min,max"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A parsed requirement value.
#[derive(Clone, Debug)]
pub enum Requirement {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Regex(Regex),
    Range(Range),
}

impl Requirement {
    pub fn requirement_type(&self) -> RequirementType {
        match self {
            Self::String(_) => RequirementType::String,
            Self::Integer(_) => RequirementType::Integer,
            Self::Float(_) => RequirementType::Float,
            Self::Boolean(_) => RequirementType::Boolean,
            Self::Regex(_) => RequirementType::Regex,
            Self::Range(_) => RequirementType::Range,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&Regex> {
        match self {
            Self::Regex(re) => Some(re),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<Range> {
        match self {
            Self::Range(range) => Some(*range),
            _ => None,
        }
    }
}

// Regexes compare by source pattern; floats compare NaN-equal so a cached
// NaN requirement still equals its clone.
impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            (Self::Range(a), Self::Range(b)) => a == b,
            _ => false,
        }
    }
}

fn parse_integer(raw: &str) -> Result<i64, ParseError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidInteger {
            value: raw.to_string(),
        })
}

fn parse_float(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_boolean(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    !(value == "false" || value == "0")
}

fn parse_range(raw: &str) -> Result<Range, ParseError> {
    let invalid = || ParseError::InvalidRange {
        value: raw.to_string(),
    };

    let bounds = raw
        .trim()
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    match bounds.as_slice() {
        [min, max] if !min.is_nan() && !max.is_nan() => Ok(Range {
            min: *min,
            max: *max,
        }),
        _ => Err(invalid()),
    }
}
