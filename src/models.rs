// Data structures shared by the inventory, the query pipeline and the HTTP layer
// e.g., VehicleRecord, ListedVehicle, response envelopes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::inventory::geo::GeoPoint;
use crate::inventory::paginate::PaginationMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    New,
    Used,
    Certified,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::Certified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::Certified => "Certified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Drivetrain {
    #[serde(rename = "4WD")]
    FourWd,
    #[serde(rename = "AWD")]
    Awd,
    #[serde(rename = "FWD")]
    Fwd,
    #[serde(rename = "RWD")]
    Rwd,
}

impl Drivetrain {
    pub const ALL: [Drivetrain; 4] = [
        Drivetrain::FourWd,
        Drivetrain::Awd,
        Drivetrain::Fwd,
        Drivetrain::Rwd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Drivetrain::FourWd => "4WD",
            Drivetrain::Awd => "AWD",
            Drivetrain::Fwd => "FWD",
            Drivetrain::Rwd => "RWD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SellerType {
    Dealer,
    #[serde(rename = "Private Seller")]
    PrivateSeller,
}

impl SellerType {
    pub const ALL: [SellerType; 2] = [SellerType::Dealer, SellerType::PrivateSeller];

    pub fn as_str(&self) -> &'static str {
        match self {
            SellerType::Dealer => "Dealer",
            SellerType::PrivateSeller => "Private Seller",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub dealer: String,
    pub seller_type: SellerType,
    pub account_number: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip: String,
    // Listings imported without a geocoded address carry no coordinates
    pub coordinates: Option<GeoPoint>,
}

// A single listing in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: u64,
    pub title: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub condition: Condition,
    pub drivetrain: Drivetrain,
    pub transmission: String,
    pub doors: String,
    pub body_style: String,
    pub exterior_color: String,
    pub mileage: u32,
    /// `None` means "call for pricing". `payment` is `None` exactly when this is.
    pub sale_price: Option<u32>,
    pub payment: Option<u32>,
    pub seller: Seller,
    pub location: Location,
    pub badges: Vec<String>,
    pub featured: bool,
    pub viewed: bool,
    pub images: Vec<String>,
}

// A record as returned by a listing query, with its distance when the query was radius-bound
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedVehicle {
    #[serde(flatten)]
    pub record: VehicleRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

// Available values for each filter dimension, each list sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub makes: Vec<String>,
    pub models: BTreeMap<String, Vec<String>>,
    pub conditions: Vec<String>,
    pub drive_types: Vec<String>,
    pub seller_types: Vec<String>,
    pub vehicle_types: Vec<String>,
    pub exterior_colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub name: String,
    pub count: usize,
}

// --- Response Wrappers ---

// Envelope for GET /api/vehicles
#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub success: bool,
    pub data: Vec<ListedVehicle>,
    pub meta: PaginationMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl VehiclesResponse {
    pub fn ok(data: Vec<ListedVehicle>, meta: PaginationMeta) -> Self {
        Self {
            success: true,
            data,
            meta,
            message: None,
            note: None,
        }
    }

    // Zeroed envelope so clients never special-case an error body
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            meta: PaginationMeta::zeroed(),
            message: Some(message.into()),
            note: None,
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

// Envelope for everything that returns a single payload
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}
