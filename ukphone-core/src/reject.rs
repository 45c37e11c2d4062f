//! Category-based rejection policy.

use std::collections::HashSet;

use log::debug;

use crate::config::Category;
use crate::errors::{UkPhoneError, ValidationError};

/// Categories a caller treats as invalid input. Fixed once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectSet {
    categories: HashSet<Category>,
}

impl RejectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from category names such as `"premium"` or `"Service"`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UkPhoneError> {
        names.iter().map(|name| name.as_ref().parse::<Category>()).collect()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Members in a stable order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = self.categories.iter().copied().collect();
        out.sort();
        out
    }
}

impl FromIterator<Category> for RejectSet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self { categories: iter.into_iter().collect() }
    }
}

impl From<&[Category]> for RejectSet {
    fn from(categories: &[Category]) -> Self {
        categories.iter().copied().collect()
    }
}

/// Fails when the matched category is one the caller rejects.
pub fn check_reject(category: Option<Category>, rejects: &RejectSet) -> Result<(), ValidationError> {
    match category {
        Some(category) if rejects.contains(category) => {
            debug!("Category '{}' is rejected by configuration", category);
            Err(ValidationError::RejectedCategory(category))
        }
        _ => Ok(()),
    }
}
