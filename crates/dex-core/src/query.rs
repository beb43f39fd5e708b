//! Query state: the user-controlled inputs that decide what is visible

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries on one page
pub const PAGE_SIZE: usize = 10;

/// Field a page is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Name,
    Height,
    Weight,
}

impl SortField {
    /// Whether ordering by this field needs every filtered entry's detail record
    pub fn needs_detail(&self) -> bool {
        matches!(self, Self::Height | Self::Weight)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A sort field paired with a direction. Textual form is `<field>_<dir>`, e.g. `name_desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub const fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// All eight keys in menu order
    pub fn all() -> [SortKey; 8] {
        use SortDirection::*;
        use SortField::*;
        [
            Self::new(Id, Asc),
            Self::new(Id, Desc),
            Self::new(Name, Asc),
            Self::new(Name, Desc),
            Self::new(Height, Asc),
            Self::new(Height, Desc),
            Self::new(Weight, Asc),
            Self::new(Weight, Desc),
        ]
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::ascending(SortField::Id)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.field.as_str(), self.direction.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort key: {0}")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .trim()
            .rsplit_once('_')
            .ok_or_else(|| ParseSortKeyError(s.to_string()))?;

        let field = match field {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "height" => SortField::Height,
            "weight" => SortField::Weight,
            _ => return Err(ParseSortKeyError(s.to_string())),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(ParseSortKeyError(s.to_string())),
        };

        Ok(Self { field, direction })
    }
}

/// Everything the user controls about the visible page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Case-insensitive substring of the entry name; empty matches all
    pub search: String,
    /// Selected categories, OR-ed together; empty matches all
    pub categories: BTreeSet<String>,
    /// Selected group id; `None` matches all
    pub group: Option<u32>,
    pub sort: SortKey,
    /// 1-based page number
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: BTreeSet::new(),
            group: None,
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Whether no filter narrows the catalog
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.categories.is_empty() && self.group.is_none()
    }
}
