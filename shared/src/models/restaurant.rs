//! Restaurant / Location / Origin / Station Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::serde_helpers::{bool_false, null_default};

// =============================================================================
// Restaurant
// =============================================================================

/// Restaurant document (table `restaurants`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Restaurant as rendered to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub concept: String,
    pub logo: String,
}

/// Create restaurant payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: Option<String>,
    pub concept: Option<String>,
    pub logo: Option<String>,
}

// =============================================================================
// Location
// =============================================================================

/// Payment configuration embedded in a location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    #[serde(default, deserialize_with = "bool_false")]
    pub accept_payment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergepay_wallets_public_id: Option<String>,
}

/// Location document (table `locations`)
///
/// `address`, `contact` and the working-hours entries are free-form and are
/// passed through to clients unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub restaurant_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_slug: Option<String>,
    #[serde(default)]
    pub address: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub working_hours: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentConfig>,
    /// Legacy flat flag, superseded by `payment.acceptPayment`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_payment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergepay_wallets_public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, deserialize_with = "null_default")]
    pub alert_numbers: Vec<String>,
    #[serde(default)]
    pub contact: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub printers: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Location details for the ordering app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    #[serde(rename = "_id")]
    pub id: String,
    pub location_slug: String,
    pub name: String,
    pub is_active: bool,
    pub accept_payment: bool,
    pub emergepay_wallets_public_id: Option<String>,
    pub is_open: bool,
}

/// Location as listed in the management app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationListing {
    #[serde(rename = "_id")]
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub address: Value,
    pub location_slug: String,
    pub is_mobile: bool,
    pub is_active: bool,
    pub is_open: bool,
    pub alert_numbers: Vec<String>,
    pub contact: Value,
    pub working_hours: Vec<Value>,
    pub timezone: String,
}

/// Create location payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCreate {
    pub name: Option<String>,
    pub location_slug: Option<String>,
    #[serde(default)]
    pub address: Value,
    pub timezone: Option<String>,
}

// =============================================================================
// Origin
// =============================================================================

/// Origin document (table `origins`): the table, parking spot or campaign
/// link a customer's QR scan resolves to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub restaurant_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub location_id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub qr_code_id: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Origin details for the ordering app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginDetails {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    pub restaurant_id: String,
    pub location_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Origins of a location plus the location's QR code styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginListing {
    pub qr_code_style: Option<Value>,
    pub qr_code_image: Option<String>,
    pub origin_data: Vec<Origin>,
}

// =============================================================================
// Station
// =============================================================================

/// Kitchen station document (table `stations`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub restaurant_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub location_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_tolerates_sparse_document() {
        let loc: Location = serde_json::from_value(serde_json::json!({
            "_id": "loc-1",
            "restaurantId": "r-1",
            "workingHours": null,
            "payment": {"acceptPayment": null}
        }))
        .unwrap();
        assert_eq!(loc.id, "loc-1");
        assert!(loc.working_hours.is_empty());
        assert!(!loc.payment.unwrap().accept_payment);
        assert!(loc.address.is_null());
    }

    #[test]
    fn test_origin_type_field() {
        let origin: Origin = serde_json::from_value(serde_json::json!({
            "_id": "table-1", "label": "Table 1", "type": "table"
        }))
        .unwrap();
        assert_eq!(origin.kind.as_deref(), Some("table"));

        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["type"], "table");
        assert_eq!(json["_id"], "table-1");
    }
}
