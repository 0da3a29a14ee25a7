//! Column policy: which header names are open for translation.

use std::collections::{
    BTreeSet,
    HashSet,
};

/// Set of translatable column names.
///
/// An unrestricted policy treats every column as eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPolicy {
    /// `None` means every column is eligible
    columns: Option<HashSet<String>>,
}

impl ColumnPolicy {
    /// Policy that allows every column.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self { columns: None }
    }

    /// Policy that allows only the given column names.
    #[must_use]
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { columns: Some(names.into_iter().map(Into::into).collect()) }
    }

    /// Build a policy from the optional `translatableColumns` setting.
    #[must_use]
    pub fn from_setting(columns: Option<&[String]>) -> Self {
        columns.map_or_else(Self::unrestricted, |names| Self::only(names.iter().cloned()))
    }

    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        self.columns.is_some()
    }

    #[must_use]
    pub fn allows(&self, column_name: &str) -> bool {
        self.columns.as_ref().is_none_or(|columns| columns.contains(column_name))
    }

    /// Indices of the header columns that are eligible for translation.
    #[must_use]
    pub fn eligible_columns(&self, header: &[String]) -> BTreeSet<usize> {
        header
            .iter()
            .enumerate()
            .filter(|(_, name)| self.allows(name))
            .map(|(index, _)| index)
            .collect()
    }
}
