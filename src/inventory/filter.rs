//! Filter criteria and the predicate deciding whether one record matches.
//!
//! Dimensions combine with AND. A list-valued dimension matches when the
//! record equals any listed value. Empty lists and `None` scalars do not
//! constrain anything.

use crate::inventory::geo::RadiusFilter;
use crate::models::{Drivetrain, ListedVehicle, VehicleRecord};

/// Menu value meaning "100,000 or more" rather than "at most 100,001".
pub const MILEAGE_SENTINEL: u32 = 100_001;
pub const HIGH_MILEAGE_THRESHOLD: u32 = 100_000;

/// Grouped drive-type menu value that covers both AWD and 4WD.
pub const AWD_OR_4WD: &str = "AWD/4WD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageFilter {
    AtMost(u32),
    Over(u32),
}

impl MileageFilter {
    /// Interprets a value from the mileage menu, including the sentinel.
    pub fn from_menu_value(value: u32) -> Self {
        if value == MILEAGE_SENTINEL {
            MileageFilter::Over(HIGH_MILEAGE_THRESHOLD)
        } else {
            MileageFilter::AtMost(value)
        }
    }

    fn admits(&self, mileage: u32) -> bool {
        match *self {
            MileageFilter::AtMost(ceiling) => mileage <= ceiling,
            MileageFilter::Over(floor) => mileage > floor,
        }
    }
}

/// Inclusive min/max bounds over an optional record value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl Bounds {
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    // A record without a value never satisfies a bound
    fn admits(&self, value: Option<u32>) -> bool {
        if !self.is_set() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub condition: Vec<String>,
    pub make: Vec<String>,
    pub model: Vec<String>,
    pub trim: Vec<String>,
    pub vehicle_type: Vec<String>,
    pub drive_type: Vec<String>,
    pub exterior_color: Vec<String>,
    pub seller_type: Vec<String>,
    pub search: Option<String>,
    pub mileage: Option<MileageFilter>,
    pub price: Bounds,
    pub payment: Bounds,
    pub radius: Option<RadiusFilter>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

fn any_of(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a == value)
}

fn drive_type_admits(allowed: &[String], drivetrain: Drivetrain) -> bool {
    allowed.is_empty()
        || allowed.iter().any(|wanted| {
            if wanted == AWD_OR_4WD {
                matches!(drivetrain, Drivetrain::Awd | Drivetrain::FourWd)
            } else {
                wanted == drivetrain.as_str()
            }
        })
}

fn search_admits(needle: &str, record: &VehicleRecord) -> bool {
    let needle = needle.to_lowercase();
    [&record.title, &record.make, &record.model]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Every dimension except distance.
pub fn matches_attributes(record: &VehicleRecord, criteria: &FilterCriteria) -> bool {
    any_of(&criteria.condition, record.condition.as_str())
        && any_of(&criteria.make, &record.make)
        && any_of(&criteria.model, &record.model)
        && any_of(&criteria.trim, &record.trim)
        && any_of(&criteria.vehicle_type, &record.body_style)
        && drive_type_admits(&criteria.drive_type, record.drivetrain)
        && any_of(&criteria.exterior_color, &record.exterior_color)
        && any_of(&criteria.seller_type, record.seller.seller_type.as_str())
        && criteria.mileage.is_none_or(|m| m.admits(record.mileage))
        && criteria.price.admits(record.sale_price)
        && criteria.payment.admits(record.payment)
        && criteria
            .search
            .as_deref()
            .is_none_or(|needle| search_admits(needle, record))
}

/// A record that passed the filter, borrowed from the store, with its
/// distance from the search center when the query has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub record: &'a VehicleRecord,
    pub distance_miles: Option<f64>,
}

impl Candidate<'_> {
    pub fn to_listed(&self) -> ListedVehicle {
        ListedVehicle {
            record: self.record.clone(),
            distance_miles: self.distance_miles,
        }
    }
}

/// Full predicate, distance included.
pub fn admit<'a>(record: &'a VehicleRecord, criteria: &FilterCriteria) -> Option<Candidate<'a>> {
    if !matches_attributes(record, criteria) {
        return None;
    }
    let distance_miles = match &criteria.radius {
        Some(radius) => Some(radius.distance_within(record.location.coordinates)?),
        None => None,
    };
    Some(Candidate {
        record,
        distance_miles,
    })
}
