//! Canonical shipping fields expected by the rate-analysis backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A fixed semantic slot in the shipping schema.
///
/// Variants are declared in canonical order; `Ord` follows that order so
/// mappings keyed by field iterate required fields first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Package weight.
    Weight,
    /// Rate currently paid to the carrier.
    #[serde(alias = "carrier_rate", alias = "carrierRate")]
    Rate,
    /// Origin ZIP / postal code.
    #[serde(alias = "origin_zip", alias = "orig_zip", alias = "originZip")]
    FromZip,
    /// Destination ZIP / postal code.
    #[serde(alias = "destination_zip", alias = "dest_zip", alias = "destinationZip")]
    ToZip,
    Length,
    Width,
    Height,
    Zone,
    /// Carrier name (UPS, FedEx, ...), not a monetary column.
    Carrier,
    #[serde(alias = "serviceLevel")]
    ServiceLevel,
    #[serde(alias = "packageType")]
    PackageType,
    #[serde(alias = "shipmentId")]
    ShipmentId,
}

impl CanonicalField {
    /// All fields in canonical order.
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::Weight,
        CanonicalField::Rate,
        CanonicalField::FromZip,
        CanonicalField::ToZip,
        CanonicalField::Length,
        CanonicalField::Width,
        CanonicalField::Height,
        CanonicalField::Zone,
        CanonicalField::Carrier,
        CanonicalField::ServiceLevel,
        CanonicalField::PackageType,
        CanonicalField::ShipmentId,
    ];

    /// Fields that must be mapped before an analysis can run.
    pub const REQUIRED: [CanonicalField; 2] = [CanonicalField::Weight, CanonicalField::Rate];

    /// Snake-case key used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Weight => "weight",
            CanonicalField::Rate => "rate",
            CanonicalField::FromZip => "from_zip",
            CanonicalField::ToZip => "to_zip",
            CanonicalField::Length => "length",
            CanonicalField::Width => "width",
            CanonicalField::Height => "height",
            CanonicalField::Zone => "zone",
            CanonicalField::Carrier => "carrier",
            CanonicalField::ServiceLevel => "service_level",
            CanonicalField::PackageType => "package_type",
            CanonicalField::ShipmentId => "shipment_id",
        }
    }

    /// Human-readable label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::Weight => "Weight",
            CanonicalField::Rate => "Carrier Rate",
            CanonicalField::FromZip => "Origin ZIP",
            CanonicalField::ToZip => "Destination ZIP",
            CanonicalField::Length => "Length",
            CanonicalField::Width => "Width",
            CanonicalField::Height => "Height",
            CanonicalField::Zone => "Zone",
            CanonicalField::Carrier => "Carrier",
            CanonicalField::ServiceLevel => "Service Level",
            CanonicalField::PackageType => "Package Type",
            CanonicalField::ShipmentId => "Shipment ID",
        }
    }

    /// Comma-separated header synonyms shown to users as a hint.
    ///
    /// The generic matching rule also splits this string on commas.
    pub fn placeholder(&self) -> &'static str {
        match self {
            CanonicalField::Weight => "weight, wt, weight (oz), weight (lbs), weight (kg)",
            CanonicalField::Rate => {
                "carrier rate, rate, cost, shipping cost, total cost, postage cost"
            }
            CanonicalField::FromZip => "origin zip, from zip, ship from zip, origin postal code",
            CanonicalField::ToZip => "destination zip, dest zip, zip, postal code, postcode",
            CanonicalField::Length => "length, package length, dimension, size",
            CanonicalField::Width => "width, package width",
            CanonicalField::Height => "height, package height",
            CanonicalField::Zone => "zone, shipping zone, delivery zone",
            CanonicalField::Carrier => "carrier, carrier name, courier, provider",
            CanonicalField::ServiceLevel => {
                "service level, service type, delivery speed, priority"
            }
            CanonicalField::PackageType => "package type, box type, container type",
            CanonicalField::ShipmentId => "shipment id, order id, tracking number, reference",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// Length, width and height share the strict matching policy.
    pub fn is_dimension(&self) -> bool {
        matches!(
            self,
            CanonicalField::Length | CanonicalField::Width | CanonicalField::Height
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    /// Parses a field key, accepting the snake_case, camelCase and legacy
    /// spellings used by older front ends (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let field = match compact.as_str() {
            "weight" => CanonicalField::Weight,
            "rate" | "carrierrate" => CanonicalField::Rate,
            "fromzip" | "originzip" | "origzip" => CanonicalField::FromZip,
            "tozip" | "destinationzip" | "destzip" => CanonicalField::ToZip,
            "length" => CanonicalField::Length,
            "width" => CanonicalField::Width,
            "height" => CanonicalField::Height,
            "zone" => CanonicalField::Zone,
            "carrier" => CanonicalField::Carrier,
            "servicelevel" => CanonicalField::ServiceLevel,
            "packagetype" => CanonicalField::PackageType,
            "shipmentid" => CanonicalField::ShipmentId,
            _ => return Err(ModelError::UnknownField(s.trim().to_string())),
        };
        Ok(field)
    }
}
