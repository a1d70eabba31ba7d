use std::path::Path;

use tokio::{fs::File, io::AsyncWriteExt};

use crate::record::ProductRecord;
use crate::Result;

/// All scraped records in scrape order: page order, then document order within a page.
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<ProductRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, page_records: Vec<ProductRecord>) {
        self.records.extend(page_records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(|r| r.price)
    }

    pub fn ratings(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(|r| r.rating)
    }

    /// Writes the table to `path` as a JSON array of records.
    pub async fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;
        let mut file = File::create(path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

impl From<Vec<ProductRecord>> for ResultTable {
    fn from(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
