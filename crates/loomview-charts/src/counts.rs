use std::collections::BTreeMap;

use loomview_core::{AttributeValues, Label, LoomError, Result};

/// Categorical charts group by one or two attributes.
pub fn ensure_attribute_count(n: usize) -> Result<()> {
    match n {
        0 => Err(LoomError::EmptyAttributes),
        1 | 2 => Ok(()),
        n => Err(LoomError::TooManyAttributes(n)),
    }
}

/// Unique labels with their occurrence counts, in ascending label order.
pub fn label_counts(values: &AttributeValues) -> Vec<(Label, usize)> {
    let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
    for label in values.labels() {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Reorder by count, largest first. Equal counts keep their current order.
pub fn sort_by_count_desc(mut counts: Vec<(Label, usize)>) -> Vec<(Label, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Occurrences of each `(outer, inner)` pair, ordered by outer then inner.
/// Pairs that never occur are omitted.
pub fn pair_counts(
    outer: &AttributeValues,
    inner: &AttributeValues,
) -> Result<Vec<((Label, Label), usize)>> {
    if outer.len() != inner.len() {
        return Err(LoomError::LengthMismatch {
            what: "grouped attributes".to_string(),
            expected: outer.len(),
            found: inner.len(),
        });
    }
    let mut counts: BTreeMap<(Label, Label), usize> = BTreeMap::new();
    for pair in outer.labels().zip(inner.labels()) {
        *counts.entry(pair).or_insert(0) += 1;
    }
    Ok(counts.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attribute_count_bounds() {
        assert!(matches!(ensure_attribute_count(0), Err(LoomError::EmptyAttributes)));
        assert!(ensure_attribute_count(1).is_ok());
        assert!(ensure_attribute_count(2).is_ok());
        assert!(matches!(
            ensure_attribute_count(3),
            Err(LoomError::TooManyAttributes(3))
        ));
    }

    #[test]
    fn test_label_counts_ascending() {
        let v = AttributeValues::from(vec!["B", "A", "B", "C", "B"]);
        assert_eq!(
            label_counts(&v),
            vec![
                (Label::from("A"), 1),
                (Label::from("B"), 3),
                (Label::from("C"), 1)
            ]
        );
    }

    #[test]
    fn test_sort_desc_is_stable() {
        let v = AttributeValues::from(vec!["B", "A", "B", "C", "B"]);
        let sorted = sort_by_count_desc(label_counts(&v));
        assert_eq!(
            sorted,
            vec![
                (Label::from("B"), 3),
                (Label::from("A"), 1),
                (Label::from("C"), 1)
            ]
        );
    }

    #[test]
    fn test_numeric_labels() {
        let v = AttributeValues::from(vec![3.0, 1.0, 3.0]);
        assert_eq!(
            label_counts(&v),
            vec![(Label::Number(1.0), 1), (Label::Number(3.0), 2)]
        );
    }

    #[test]
    fn test_signed_zero_counts_as_zero() {
        let v = AttributeValues::from(vec![0.0, -0.0, 0.0, 1.0]);
        assert_eq!(
            label_counts(&v),
            vec![(Label::from(0.0), 3), (Label::from(1.0), 1)]
        );

        let inner = AttributeValues::from(vec!["x", "x", "y", "y"]);
        let pairs = pair_counts(&v, &inner).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ((Label::from(0.0), Label::from("x")), 2));
    }

    #[test]
    fn test_pair_counts() {
        let outer = AttributeValues::from(vec!["A", "A", "B", "A"]);
        let inner = AttributeValues::from(vec!["x", "y", "x", "x"]);
        let counts = pair_counts(&outer, &inner).unwrap();
        assert_eq!(
            counts,
            vec![
                ((Label::from("A"), Label::from("x")), 2),
                ((Label::from("A"), Label::from("y")), 1),
                ((Label::from("B"), Label::from("x")), 1),
            ]
        );
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 4);
    }

    #[test]
    fn test_pair_counts_length_mismatch() {
        let outer = AttributeValues::from(vec!["A"]);
        let inner = AttributeValues::from(vec!["x", "y"]);
        assert!(pair_counts(&outer, &inner).is_err());
    }
}
