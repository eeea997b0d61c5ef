//! Write-path checks for a role sidebar's menu items

use validator::Validate;

use crate::domain::MenuItem;
use crate::error::DomainError;

/// Items ready to persist, plus non-fatal findings for the editor.
#[derive(Debug, Clone, Default)]
pub struct ValidatedItems {
    pub items: Vec<MenuItem>,
    pub warnings: Vec<String>,
}

/// Fills missing sequences, sorts, and checks every parent reference.
///
/// A reference must match some other item by name or by label; the
/// first dangling one rejects the whole set.
pub fn prepare_items(items: Vec<MenuItem>) -> Result<ValidatedItems, DomainError> {
    let mut items: Vec<MenuItem> = items
        .into_iter()
        .enumerate()
        .map(|(idx, mut item)| {
            item.label = item.label.trim().to_string();
            if item.sequence.is_none() {
                item.sequence = Some(idx as i32 + 1);
            }
            item
        })
        .collect();

    for item in &items {
        item.validate()?;
    }

    items.sort_by_key(MenuItem::sort_key);

    let mut warnings = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        let Some(parent_ref) = item.parent() else {
            continue;
        };

        let by_name = other_matches(&items, idx, |c| c.explicit_name() == Some(parent_ref));
        let candidates = if by_name.is_empty() {
            other_matches(&items, idx, |c| c.label == parent_ref)
        } else {
            by_name
        };

        let Some(&first) = candidates.first() else {
            return Err(DomainError::ValidationError(format!(
                "Parent item '{}' not found for item '{}'",
                parent_ref, item.label
            )));
        };

        if candidates.len() > 1 {
            warnings.push(format!(
                "Parent reference '{}' of item '{}' matches {} items; give the parent a unique name",
                parent_ref,
                item.label,
                candidates.len()
            ));
            continue;
        }

        let parent = &items[first];
        if parent.is_section_break() {
            warnings.push(format!(
                "Item '{}' is nested under section break '{}' and will not be shown",
                item.label, parent.label
            ));
        } else if parent.parent().is_some() {
            warnings.push(format!(
                "Item '{}' is nested under child item '{}' and will not be shown",
                item.label, parent.label
            ));
        }
    }

    Ok(ValidatedItems { items, warnings })
}

fn other_matches(items: &[MenuItem], skip: usize, pred: impl Fn(&MenuItem) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(i, candidate)| *i != skip && pred(candidate))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinkTarget, LinkType};

    fn doc(label: &str) -> MenuItem {
        MenuItem::link(label, LinkTarget::new(LinkType::DocType, label))
    }

    #[test]
    fn test_missing_sequence_uses_position() {
        let prepared = prepare_items(vec![doc("A"), doc("B").with_sequence(0), doc("C")]).unwrap();
        let seqs: Vec<_> = prepared.items.iter().map(|i| (i.label.as_str(), i.sequence)).collect();
        assert_eq!(seqs, vec![("B", Some(0)), ("A", Some(1)), ("C", Some(3))]);
    }

    #[test]
    fn test_dangling_parent_is_rejected() {
        let err = prepare_items(vec![doc("Reports"), doc("Sub").with_parent("Missing")]).unwrap_err();
        match err {
            DomainError::ValidationError(msg) => {
                assert_eq!(msg, "Parent item 'Missing' not found for item 'Sub'")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_self_reference_counts_as_missing() {
        assert!(prepare_items(vec![doc("Loop").with_parent("Loop")]).is_err());
    }

    #[test]
    fn test_parent_by_name_or_label() {
        let prepared = prepare_items(vec![
            doc("Reports").with_name("row-1"),
            doc("ByName").with_parent("row-1"),
            doc("ByLabel").with_parent("Reports"),
        ])
        .unwrap();
        assert!(prepared.warnings.is_empty());
    }

    #[test]
    fn test_label_collision_warns() {
        let prepared = prepare_items(vec![
            doc("Reports").with_name("a"),
            doc("Reports").with_name("b"),
            doc("Sub").with_parent("Reports"),
        ])
        .unwrap();
        assert_eq!(prepared.warnings.len(), 1);
        assert!(prepared.warnings[0].contains("matches 2 items"));
    }

    #[test]
    fn test_unnamed_label_collision_warns() {
        let prepared = prepare_items(vec![
            doc("Reports"),
            doc("Reports"),
            doc("Sub").with_parent("Reports"),
        ])
        .unwrap();
        assert_eq!(prepared.warnings.len(), 1);
        assert!(prepared.warnings[0].contains("matches 2 items"));
    }

    #[test]
    fn test_unreachable_nesting_warns() {
        let prepared = prepare_items(vec![
            MenuItem::section("HR"),
            doc("Employee").with_parent("HR"),
            doc("Leave").with_parent("Employee"),
        ])
        .unwrap();
        assert_eq!(prepared.warnings.len(), 2);
    }

    #[test]
    fn test_blank_label_rejected() {
        let err = prepare_items(vec![doc("  ")]).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
