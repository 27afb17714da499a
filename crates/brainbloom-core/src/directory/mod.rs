//! Support directory domain module: peers, professional resources and
//! emergency hotlines.

mod emergency;
mod peer;
mod resource;

pub use emergency::{EMERGENCY_CONTACTS, EmergencyContact, phone_for_action};
pub use peer::PeerProfile;
pub use resource::{Availability, GeoLocation, Resource, ResourceFilter, ResourceKind};
