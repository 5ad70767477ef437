use crate::models::{Customer, Vehicle};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub vehicles: Vec<Vehicle>,
    pub customers: Vec<Customer>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.customers.is_empty()
    }
}

/// Case-insensitive substring search over vehicles (make, model, year, VIN)
/// and customers (name, company, email, phone).
///
/// An empty query matches nothing rather than everything. A query of only
/// spaces is not empty and is matched literally.
pub fn search(query: &str, vehicles: &[Vehicle], customers: &[Customer]) -> SearchResults {
    if query.is_empty() {
        return SearchResults::default();
    }
    let needle = query.to_lowercase();

    SearchResults {
        vehicles: vehicles
            .iter()
            .filter(|v| vehicle_matches(v, &needle))
            .cloned()
            .collect(),
        customers: customers
            .iter()
            .filter(|c| customer_matches(c, &needle))
            .cloned()
            .collect(),
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// `needle` must already be lower-case.
pub fn vehicle_matches(vehicle: &Vehicle, needle: &str) -> bool {
    contains(&vehicle.make, needle)
        || contains(&vehicle.model, needle)
        || vehicle.year.to_string().contains(needle)
        || contains(&vehicle.vin, needle)
}

/// `needle` must already be lower-case.
pub fn customer_matches(customer: &Customer, needle: &str) -> bool {
    contains(&customer.name, needle)
        || contains(&customer.company, needle)
        || contains(&customer.email, needle)
        || contains(&customer.phone, needle)
}
