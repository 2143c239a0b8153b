mod agent_tests;
mod api_tests;
mod auth_flow_tests;
mod home_tests;
mod properties_tests;

use crate::db::properties::{self, PropertyFields};
use crate::db::Database;

/// Insert a listing owned by `agent_id` in the given city.
pub(crate) fn seed_listing(db: &Database, agent_id: i64, street: &str, city: &str, state: &str) -> i64 {
    let fields = PropertyFields {
        street: street.into(),
        city: city.into(),
        state: state.into(),
        price: Some(450000.0),
        bedrooms: Some(3.0),
        bathrooms: Some(2.0),
        sqft: Some(1850.0),
        offer_type: "sale".into(),
        property_type: "HOUSE".into(),
        description: "Quiet street, big yard".into(),
    };
    properties::insert(db, agent_id, &fields, "/uploads/seed.jpg").unwrap()
}
