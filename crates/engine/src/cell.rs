use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A single decoded cell value.
///
/// `Empty` is a value of its own: it is neither `Number(0)` nor `Text("")`.
/// Equality is exact and typed, so `Number(10)` and `Text("10")` differ.
/// Numbers compare through `OrderedFloat` so cells can key hash maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(OrderedFloat<f64>),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    pub fn number(n: f64) -> Self {
        Cell::Number(OrderedFloat(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// No content at all: `Empty` or an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Exactly the empty string. `Empty` is not empty text.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }

    /// Numeric zero. Blank cells and the text "0" are not zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Cell::Number(n) if n.0 == 0.0)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(n.0),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Blank or numeric zero.
    pub fn is_falsy(&self) -> bool {
        self.is_blank() || self.is_zero()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Number(_) => "number",
            Cell::Text(_) => "string",
            Cell::Empty => "empty",
        }
    }

    /// Column name a header cell contributes, if any. Blank and zero
    /// headers name nothing.
    pub fn header_name(&self) -> Option<String> {
        if self.is_falsy() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => {
                let n = n.0;
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}
