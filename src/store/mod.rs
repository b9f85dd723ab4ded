//! In-memory document store, loaded once per session.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::domain::{month_index, DocumentRecord, NOT_APPLICABLE};
use crate::filter::Dimension;
use crate::utils::read_file_safe;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed reading data file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid document data in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: Vec<DocumentRecord>,
    source: Option<PathBuf>,
}

impl DocumentStore {
    pub fn from_records(documents: Vec<DocumentRecord>) -> Self {
        Self { documents, source: None }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        Self::parse(raw, "<inline>").map(Self::from_records)
    }

    /// Load the data file, detecting its text encoding first.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let (content, encoding) = read_file_safe(path, None, None).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })?;
        let documents = Self::parse(&content, &path.display().to_string())?;
        info!("Loaded {} documents from {} ({})", documents.len(), path.display(), encoding);
        Ok(Self { documents, source: Some(path.to_path_buf()) })
    }

    fn parse(raw: &str, origin: &str) -> Result<Vec<DocumentRecord>, StoreError> {
        let raw = raw.trim_start_matches('\u{feff}');
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(raw)
            .map_err(|source| StoreError::Parse { origin: origin.to_string(), source })
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Distinct values per dimension for building filter pickers.
    pub fn facets(&self) -> Facets {
        Facets::collect(&self.documents)
    }
}

/// Distinct, ordered values per filter dimension.
///
/// Months follow the calendar, years sort numerically, everything else sorts
/// lexically. `"Not applicable"` is left out of the subcategory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    values: BTreeMap<Dimension, Vec<String>>,
}

impl Facets {
    pub fn collect(docs: &[DocumentRecord]) -> Self {
        let mut values = BTreeMap::new();
        for dimension in Dimension::ALL {
            let mut unique: BTreeSet<String> = BTreeSet::new();
            for doc in docs {
                for value in dimension.values(doc) {
                    if value.trim().is_empty() {
                        continue;
                    }
                    if dimension == Dimension::Subcategory && value == NOT_APPLICABLE {
                        continue;
                    }
                    unique.insert(value.into_owned());
                }
            }
            let mut ordered: Vec<String> = unique.into_iter().collect();
            match dimension {
                Dimension::Month => ordered.sort_by_key(|m| (month_index(m).unwrap_or(12), m.clone())),
                Dimension::Year => {
                    ordered.sort_by_key(|y| (y.parse::<i64>().unwrap_or(i64::MAX), y.clone()))
                }
                _ => {}
            }
            values.insert(dimension, ordered);
        }
        Self { values }
    }

    pub fn get(&self, dimension: Dimension) -> &[String] {
        self.values.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &[String])> {
        self.values.iter().map(|(d, v)| (*d, v.as_slice()))
    }
}
