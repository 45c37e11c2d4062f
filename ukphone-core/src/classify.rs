//! First-match classification against an ordered table.

use log::debug;

use crate::errors::ValidationError;
use crate::normalize::NormalizedNumber;
use crate::table::compiler::{CompiledSpec, SpecTable};

/// Returns the first row, in declared order, whose pattern matches the number.
pub fn classify<'t>(number: &NormalizedNumber, table: &'t SpecTable) -> Option<&'t CompiledSpec> {
    let found = table.iter().find(|spec| spec.matches(number.as_str()));
    match found {
        Some(spec) => debug!(
            "Matched spec #{} (category {:?}, layout {:?})",
            spec.index, spec.category, spec.layout
        ),
        None => debug!("No spec matched"),
    }
    found
}

/// Like `classify`, with a miss reported as `PartialNumber`.
pub fn classify_or_partial<'t>(
    number: &NormalizedNumber,
    table: &'t SpecTable,
) -> Result<&'t CompiledSpec, ValidationError> {
    classify(number, table).ok_or(ValidationError::PartialNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Category, Layout, NumberSpec};
    use crate::normalize::normalize;
    use crate::table::compiler::{compile_specs, default_table};

    #[test]
    fn first_match_wins_over_broader_rows() {
        let table = compile_specs(vec![
            NumberSpec {
                pattern: r"^0207\d{7}$".to_string(),
                category: None,
                layout: Some(Layout::fixed(&[4, 3, 4]).unwrap()),
            },
            NumberSpec {
                pattern: r"^0".to_string(),
                category: Some(Category::Premium),
                layout: None,
            },
        ])
        .unwrap();

        let spec = classify(&normalize("02079460123"), &table).unwrap();
        assert_eq!(spec.index, 0);
        assert_eq!(spec.category, None);

        let spec = classify(&normalize("0161"), &table).unwrap();
        assert_eq!(spec.index, 1);
        assert_eq!(spec.category, Some(Category::Premium));
    }

    #[test]
    fn uk_table_resolves_overlaps_by_order() {
        let table = default_table().unwrap();

        // 116xxx is caught by the 11[68] row before the leading-1 catch-all.
        let spec = classify(&normalize("116123"), &table).unwrap();
        assert_eq!(spec.pattern, "^11[68]");

        let spec = classify(&normalize("123"), &table).unwrap();
        assert_eq!(spec.pattern, "^1");
        assert_eq!(spec.layout, None);

        // 0800 1111 sits above the general 0800 row.
        let spec = classify(&normalize("08001111"), &table).unwrap();
        assert_eq!(spec.layout, Some(Layout::fixed(&[4, 4]).unwrap()));
    }

    #[test]
    fn unknown_prefix_is_partial() {
        let table = default_table().unwrap();
        assert_eq!(
            classify_or_partial(&normalize("0123"), &table).map(|s| s.index),
            Err(ValidationError::PartialNumber)
        );
        assert!(classify(&normalize(""), &table).is_none());
    }
}
