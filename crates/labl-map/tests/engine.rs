use labl_map::{ColumnMapper, normalize_for_headers, suggest_mapping, validate};
use labl_model::{CanonicalField, ColumnMapping, ValidationOutcome};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn maps_full_manifest_header_row() {
    let cols = headers(&[
        "Shipment ID",
        "Weight",
        "Carrier Fee",
        "Zone",
        "Ship Postal Code",
        "Origin Zip",
        "Length",
        "Width",
        "Height",
    ]);
    let mapping = suggest_mapping(&cols);

    let expected: ColumnMapping = [
        (CanonicalField::ShipmentId, "Shipment ID"),
        (CanonicalField::Weight, "Weight"),
        (CanonicalField::Rate, "Carrier Fee"),
        (CanonicalField::Zone, "Zone"),
        (CanonicalField::ToZip, "Ship Postal Code"),
        (CanonicalField::FromZip, "Origin Zip"),
        (CanonicalField::Length, "Length"),
        (CanonicalField::Width, "Width"),
        (CanonicalField::Height, "Height"),
    ]
    .into_iter()
    .map(|(field, header)| (field, header.to_string()))
    .collect();

    assert_eq!(mapping, expected);
    assert_eq!(validate(&mapping), ValidationOutcome::Ok);
}

#[test]
fn empty_header_row_maps_nothing() {
    let mapping = suggest_mapping(&[]);
    assert!(mapping.is_empty());
    assert_eq!(
        validate(&mapping),
        ValidationOutcome::Missing(vec![CanonicalField::Weight, CanonicalField::Rate])
    );
    let json = serde_json::to_string(&validate(&ColumnMapping::new())).unwrap();
    assert_eq!(json, r#"{"ok":false,"missing":["weight","rate"]}"#);
}

#[test]
fn dimensions_prefer_literal_header_over_single_letter() {
    let mapping = suggest_mapping(&headers(&["Length (in)", "Random Field", "L"]));
    assert_eq!(mapping.get(CanonicalField::Length), Some("Length (in)"));
}

#[test]
fn single_letter_dimensions_stay_unmapped() {
    let mapping = suggest_mapping(&headers(&["L", "W", "H"]));
    assert_eq!(mapping.get(CanonicalField::Length), None);
    assert_eq!(mapping.get(CanonicalField::Width), None);
    assert_eq!(mapping.get(CanonicalField::Height), None);
}

#[test]
fn rate_never_maps_to_carrier_name() {
    let mapping = suggest_mapping(&headers(&["Carrier", "Carrier Rate", "Total Cost"]));
    let rate = mapping.get(CanonicalField::Rate);
    assert!(matches!(rate, Some("Carrier Rate") | Some("Total Cost")));
    assert_ne!(rate, Some("Carrier"));
    assert_eq!(mapping.get(CanonicalField::Carrier), Some("Carrier"));
}

#[test]
fn lone_zip_is_destination() {
    let mapping = suggest_mapping(&headers(&["Zip", "Origin Zip"]));
    assert_eq!(mapping.get(CanonicalField::ToZip), Some("Zip"));
    assert_eq!(mapping.get(CanonicalField::FromZip), Some("Origin Zip"));
}

#[test]
fn origin_first_does_not_steal_destination() {
    let mapping = suggest_mapping(&headers(&["Ship From Zip", "Dest Zip"]));
    assert_eq!(mapping.get(CanonicalField::FromZip), Some("Ship From Zip"));
    assert_eq!(mapping.get(CanonicalField::ToZip), Some("Dest Zip"));
}

#[test]
fn leftmost_candidate_wins() {
    let mapping = suggest_mapping(&headers(&["Shipping Cost", "Total Cost"]));
    assert_eq!(mapping.get(CanonicalField::Rate), Some("Shipping Cost"));
}

#[test]
fn weight_variants_are_recognized() {
    for header in ["Weight (lbs)", "weight_lbs", "Pkg Wt", "Weight (oz)", "KG"] {
        let mapping = suggest_mapping(&headers(&[header]));
        assert_eq!(mapping.get(CanonicalField::Weight), Some(header), "{header}");
    }
}

#[test]
fn weight_units_without_separators_are_recognized() {
    for header in ["PkgWt", "TotalLbs", "ShipWtOz"] {
        let mapping = suggest_mapping(&headers(&[header, "Cost"]));
        assert_eq!(mapping.get(CanonicalField::Weight), Some(header), "{header}");
        assert!(validate(&mapping).is_ok(), "{header}");
    }
}

#[test]
fn stale_profile_entries_are_dropped() {
    let mut saved = ColumnMapping::new();
    saved.insert(CanonicalField::Weight, "Weight");
    saved.insert(CanonicalField::Rate, "Postage Cost");
    let pruned = normalize_for_headers(&saved, &headers(&["Weight", "Total Cost"]));
    assert_eq!(pruned.get(CanonicalField::Weight), Some("Weight"));
    assert_eq!(pruned.get(CanonicalField::Rate), None);
    assert_eq!(
        validate(&pruned),
        ValidationOutcome::Missing(vec![CanonicalField::Rate])
    );
}

#[test]
fn mapper_is_deterministic() {
    let cols = headers(&["Zip", "Weight", "Cost", "Service Level", "Box Type"]);
    let mapper = ColumnMapper::new();
    assert_eq!(mapper.suggest_mapping(&cols), mapper.suggest_mapping(&cols));
}
