use std::fmt;

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// What the user asked for. Built once at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    base_url: String,
    page_count: usize,
}

impl ScrapeRequest {
    pub fn new(base_url: impl Into<String>, page_count: usize) -> Result<Self> {
        if page_count == 0 {
            return Err(Error::InvalidPageCount);
        }
        Ok(Self {
            base_url: base_url.into(),
            page_count,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Page indices in the order they get scraped.
    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.page_count
    }
}

pub const NOT_AVAILABLE: &str = "Not Available";

/// A text field that is either found on the page or replaced by the "Not Available" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Text(String),
    NotAvailable,
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::Text(s) => s,
            Label::NotAvailable => NOT_AVAILABLE,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Label::Text(s) => Some(s),
            Label::NotAvailable => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One product block from a results page. Numeric fields are `None` when missing or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: Label,
    pub price: Option<f64>,
    pub discount: Label,
    pub rating: Option<f64>,
}
