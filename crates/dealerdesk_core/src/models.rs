//! Records owned by the aggregate store.
//!
//! Field names serialize in camelCase, matching the fixture files and the
//! form submission wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    Sold,
    Pending,
}

/// A vehicle held in a dealership's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    /// Whole currency units.
    pub price: u64,
    pub mileage: u64,
    pub status: VehicleStatus,
    pub image_url: String,
    pub vin: String,
    #[serde(flatten)]
    pub details: VehicleDetails,
}

/// Descriptive and contact fields captured by the listing form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<u8>,
    /// Free text because the form offers "8+".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// A vehicle as entered in the listing form, before the store assigns its
/// id, status, image and VIN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    pub make: String,
    pub model: String,
    pub year: u16,
    pub price: u64,
    pub mileage: u64,
    #[serde(flatten)]
    pub details: VehicleDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealership {
    pub id: String,
    pub name: String,
    pub location: String,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Individual,
    Business,
    Government,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatus {
    Lead,
    Active,
    #[serde(rename = "VIP")]
    Vip,
    Prospect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub initials: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub status: CustomerStatus,
    pub total_spent: u64,
    pub purchases: u32,
    pub enquiries: u32,
    /// Display date such as "Jan 15, 2024".
    pub last_contact: String,
}

/// A customer as entered in the add-customer form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Vehicle,
    Customer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Initials shown in the customer avatar: first letter of the first word plus
/// first letter of the last word when there is more than one, upper-cased.
pub fn initials_for(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().and_then(|w| w.chars().next());
    let last = words.last().and_then(|w| w.chars().next());

    first
        .into_iter()
        .chain(last)
        .flat_map(char::to_uppercase)
        .collect()
}
