//! Table ordering for display

use memoscope_core::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column to order by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Email,
    Category,
    Magnitude,
    Joined,
}

/// Ordering direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort field '{0}' (expected name, email, category, magnitude or joined)")]
pub struct ParseSortFieldError(String);

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "category" | "department" => Ok(SortField::Category),
            "magnitude" | "salary" => Ok(SortField::Magnitude),
            "joined" | "join-date" => Ok(SortField::Joined),
            _ => Err(ParseSortFieldError(s.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Category => "category",
            SortField::Magnitude => "magnitude",
            SortField::Joined => "joined",
        };
        f.write_str(name)
    }
}

fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Magnitude => a.magnitude.cmp(&b.magnitude),
        SortField::Joined => a.joined.cmp(&b.joined),
    }
}

/// Stable-sorted copy of `rows`; the input is left untouched
///
/// Ties keep their source order in both directions.
pub fn sorted(rows: &[Record], field: SortField, direction: SortDirection) -> Vec<Record> {
    let mut out = rows.to_vec();
    out.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b, field),
        SortDirection::Desc => compare(b, a, field),
    });
    out
}
