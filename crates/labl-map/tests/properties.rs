use proptest::collection::vec;
use proptest::prelude::*;

use labl_map::{AssignmentMode, ColumnMapper, normalize_for_headers, suggest_mapping, validate};
use labl_model::{CanonicalField, ColumnMapping};

/// Header names drawn from realistic manifest vocabulary plus noise.
fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "Weight", "Wt (oz)", "Zip", "Origin Zip", "Dest Zip", "Carrier", "Carrier Rate",
            "Total Cost", "Zone", "Length", "Width", "Height", "L", "W", "H", "Service Level",
            "Package Type", "Order ID", "Notes",
        ])
        .prop_map(str::to_string),
        "[A-Za-z _()]{0,16}",
    ]
}

fn field() -> impl Strategy<Value = CanonicalField> {
    prop::sample::select(CanonicalField::ALL.to_vec())
}

fn mapping() -> impl Strategy<Value = ColumnMapping> {
    vec((field(), header()), 0..8)
        .prop_map(|entries| entries.into_iter().collect::<ColumnMapping>())
}

proptest! {
    #[test]
    fn suggestion_is_idempotent(headers in vec(header(), 0..12)) {
        prop_assert_eq!(suggest_mapping(&headers), suggest_mapping(&headers));
    }

    #[test]
    fn suggested_headers_come_from_input(headers in vec(header(), 0..12)) {
        for mode in [AssignmentMode::Independent, AssignmentMode::Exclusive] {
            let mapping = ColumnMapper::new().with_mode(mode).suggest_mapping(&headers);
            for (_, mapped) in mapping.iter() {
                prop_assert!(headers.iter().any(|h| h == mapped));
            }
        }
    }

    #[test]
    fn exclusive_mode_never_reuses_a_header(headers in vec(header(), 0..12)) {
        let mapping = ColumnMapper::new()
            .with_mode(AssignmentMode::Exclusive)
            .suggest_mapping(&headers);
        let mut seen: Vec<&str> = mapping.iter().map(|(_, h)| h).collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
    }

    #[test]
    fn validation_matches_required_fields(mapping in mapping()) {
        let expected = CanonicalField::REQUIRED
            .iter()
            .all(|field| mapping.get(*field).is_some_and(|h| !h.trim().is_empty()));
        prop_assert_eq!(validate(&mapping).is_ok(), expected);
    }

    #[test]
    fn pruning_keeps_a_subset_within_headers(
        mapping in mapping(),
        headers in vec(header(), 0..12),
    ) {
        let pruned = normalize_for_headers(&mapping, &headers);
        for (field, mapped) in pruned.iter() {
            prop_assert!(headers.iter().any(|h| h == mapped));
            prop_assert_eq!(mapping.get(field), Some(mapped));
        }
    }
}
