use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

impl GeoLocation {
    /// Used when no location has been configured.
    pub const SAN_FRANCISCO: GeoLocation = GeoLocation {
        lat: 37.7749,
        lng: -122.4194,
    };
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::SAN_FRANCISCO
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Therapist,
    CrisisCenter,
    Hospital,
    SupportGroup,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    Immediate,
    SameDay,
    WithinWeek,
}

/// A professional or community support resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub address: String,
    pub phone: String,
    pub rating: f32,
    pub availability: Availability,
    pub accepts_insurance: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub specialties: Vec<String>,
}

/// Narrows a resource list by free-text search and kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Matched case-insensitively against the name and each specialty
    pub search: String,
    /// `None` keeps every kind
    pub kind: Option<ResourceKind>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = resource.name.to_lowercase().contains(&term)
            || resource
                .specialties
                .iter()
                .any(|s| s.to_lowercase().contains(&term));
        let matches_kind = self.kind.is_none_or(|kind| kind == resource.kind);
        matches_search && matches_kind
    }

    /// Keeps the matching resources, preserving order.
    pub fn apply(&self, resources: Vec<Resource>) -> Vec<Resource> {
        resources.into_iter().filter(|r| self.matches(r)).collect()
    }
}
