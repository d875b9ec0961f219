use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Final output entity for one hotel, immutable once built
///
/// Every field except `url` and `priceTag` is optional: a field is absent
/// when the listing page's matching text pattern failed, never an error.
/// Serialized in camelCase to match the dataset's historical key names;
/// absent fields are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelRecord {
    /// Upstream hotel id, passed through untyped (the site has emitted
    /// both numeric and string ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrs_id: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Display name from the click-tracking blob, falling back to `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,

    /// Kilometers to the city center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_distance: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport_distance: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_station_distance: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,

    /// Star rating as the raw class-name suffix, e.g. "4.5"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<String>,

    /// Price and currency, space-separated; a missing part renders as the
    /// literal "undefined"
    pub price_tag: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,

    pub url: String,
}

/// Diagnostic record for a request that exhausted its retry budget
///
/// Written once to the sink under the reserved `#debug` key and never
/// retried further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugRecord {
    pub url: String,
    pub retry_count: u32,
    pub error_message: String,
    pub failed_at: String,
}
