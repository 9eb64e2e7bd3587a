//! Wire types for the Rebound consumer-portal API.
//!
//! Field names mirror the upstream camelCase JSON. Collection-valued fields
//! default to empty so partial payloads (pickup services carry no drop-off
//! locations, drop-off services no collection dates) deserialize cleanly.

use retflow_core::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Response body of the OAuth2 client-credentials token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// One page of postal services (return methods), Spring page envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalServicePage {
    pub content: Vec<PostalService>,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

/// A bookable return method: a pickup service or a drop-off service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalService {
    pub id: String,
    pub postal_company_id: i64,
    pub display_name: String,
    pub description: Option<String>,
    pub eco_score: Option<String>,
    pub logo: Option<String>,
    /// `"PICK_UP"` or `"DROP_OFF"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub paperless: bool,
    pub available: bool,
    pub price: Price,
    #[serde(default)]
    pub drop_off_locations: Vec<ServiceDropOffLocation>,
    #[serde(default)]
    pub mandatory_fields: Vec<String>,
    #[serde(default)]
    pub collection_dates: Vec<CollectionDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: f64,
    pub currency: Option<String>,
}

/// A drop-off location embedded in a postal-service search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDropOffLocation {
    pub id: String,
    pub name: String,
    pub address: ServiceAddress,
    #[serde(default)]
    pub opening_hours: String,
    pub distance: f64,
    pub distance_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddress {
    pub street_address: String,
    pub city: String,
    pub postal_code: String,
    pub country_code: String,
}

/// A pickup date with its bookable time slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDate {
    pub date: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
}

/// Response of the drop-off-point search around a customer address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropOffSearchResponse {
    pub drop_off_point_list: Vec<DropOffPoint>,
    /// Geocoded coordinate of the customer's street address, the reference
    /// point for proximity ranking.
    pub customer_street_geo_location: GeoPoint,
}

/// A physical hand-off location (postal shop, locker, department store desk).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropOffPoint {
    pub name: String,
    #[serde(default)]
    pub open_now: bool,
    pub closing_time: Option<String>,
    pub address: String,
    /// Absent for points the upstream could not geocode.
    pub geo_location: Option<GeoPoint>,
    #[serde(default)]
    pub weekday_descriptions: String,
    pub google_maps_uri: Option<String>,
}
