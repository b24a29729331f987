use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Statement rows with an abbreviated month: `03 Apr 2017`.
pub const ABBREV_MONTH_PATTERN: &str = r"^\f?\s*(?P<date>\d{2} [A-Z][a-z]{2} \d{4})\s+(?P<description>.*)\s\s+(?P<amount>[,0-9]+\.\d+)\s\s+(?P<balance>[,0-9]+\.\d+)";

/// Statement rows with a numeric date: `01/01/2015`.
pub const NUMERIC_DATE_PATTERN: &str = r"^\f?\s*(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<description>.*)\s\s+(?P<amount>[,0-9]+\.\d+)\s\s+(?P<balance>[,0-9]+\.\d+)";

const REQUIRED_GROUPS: [&str; 4] = ["date", "description", "amount", "balance"];

/// One candidate layout for a statement row, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineShape {
    pub name: String,
    pub pattern: String,
}

impl LineShape {
    pub fn new(name: &str, pattern: &str) -> Self {
        LineShape {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }

    pub fn defaults() -> Vec<LineShape> {
        vec![
            LineShape::new("abbrev-month", ABBREV_MONTH_PATTERN),
            LineShape::new("numeric-date", NUMERIC_DATE_PATTERN),
        ]
    }
}

/// The four raw fields pulled out of a matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine<'a> {
    /// Name of the shape that matched.
    pub shape: &'a str,
    pub date: &'a str,
    pub description: &'a str,
    pub amount: &'a str,
    pub balance: &'a str,
}

struct CompiledShape {
    name: String,
    regex: Regex,
}

/// Tries each configured shape in order and returns the first match.
pub struct LineMatcher {
    shapes: Vec<CompiledShape>,
}

impl LineMatcher {
    pub fn new(shapes: &[LineShape]) -> Result<Self, ConfigError> {
        if shapes.is_empty() {
            return Err(ConfigError::NoShapes);
        }

        let shapes = shapes
            .iter()
            .map(|shape| {
                let regex = Regex::new(&shape.pattern).map_err(|e| ConfigError::InvalidPattern {
                    shape: shape.name.clone(),
                    message: e.to_string(),
                })?;
                let names: Vec<&str> = regex.capture_names().flatten().collect();
                if let Some(missing) = REQUIRED_GROUPS.iter().find(|g| !names.contains(*g)) {
                    return Err(ConfigError::MissingGroup {
                        shape: shape.name.clone(),
                        group: (*missing).to_string(),
                    });
                }
                Ok(CompiledShape {
                    name: shape.name.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { shapes })
    }

    /// Returns `None` for headers, footers and anything else that is not a
    /// transaction row.
    pub fn match_line<'a>(&'a self, line: &'a str) -> Option<MatchedLine<'a>> {
        self.shapes.iter().find_map(|shape| {
            let c = shape.regex.captures(line)?;
            Some(MatchedLine {
                shape: &shape.name,
                date: c.name("date")?.as_str(),
                description: c.name("description")?.as_str(),
                amount: c.name("amount")?.as_str(),
                balance: c.name("balance")?.as_str(),
            })
        })
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new(&LineShape::defaults()).expect("invalid built-in line shape")
    }
}
