//! Which tables are listed to users.
//!
//! Hidden tables are only left out of listings; they are still patched.

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use crate::types::DatasetCollection;

/// Glob-based filter for table listings.
#[derive(Debug, Clone)]
pub struct TableFilter {
    /// Patterns of hidden table names
    hidden: GlobSet,
}

impl TableFilter {
    /// Build a filter hiding every table that matches one of `patterns`.
    ///
    /// # Errors
    /// A pattern is not a valid glob.
    pub fn new(patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self { hidden: builder.build()? })
    }

    /// Filter that hides nothing.
    #[must_use]
    pub fn show_all() -> Self {
        Self { hidden: GlobSet::empty() }
    }

    #[must_use]
    pub fn is_hidden(&self, table: &str) -> bool {
        self.hidden.is_match(table)
    }

    /// Visible table names of `collection`, sorted.
    #[must_use]
    pub fn visible_tables<'a>(&self, collection: &'a DatasetCollection) -> Vec<&'a str> {
        collection.keys().map(String::as_str).filter(|table| !self.is_hidden(table)).collect()
    }
}
