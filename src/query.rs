// Turns flat request parameters into a typed VehicleQuery
// Multi-value fields are comma-separated; empty values count as absent.

use serde::Deserialize;
use thiserror::Error;

use crate::inventory::filter::{Bounds, FilterCriteria, MileageFilter};
use crate::inventory::geo::{GeoPoint, RadiusFilter};
use crate::inventory::paginate::{
    PaginationError, PaginationRequest, SortError, SortField, SortOrder, SortSpec, DEFAULT_PAGE_SIZE,
};
use crate::inventory::store::VehicleQuery;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Parameter '{name}' must be a whole number, got '{value}'")]
    NotANumber { name: &'static str, value: String },
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    Sort(#[from] SortError),
}

/// Raw listing parameters as they arrive on the query string. Everything is
/// kept as text so malformed numbers are reported with the parameter name.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub condition: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub vehicle_type: Option<String>,
    pub drive_type: Option<String>,
    pub exterior_color: Option<String>,
    pub seller_type: Option<String>,
    pub search: Option<String>,
    pub mileage: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub payment_min: Option<String>,
    pub payment_max: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn value(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn list(raw: &Option<String>) -> Vec<String> {
    value(raw)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn number(raw: &Option<String>, name: &'static str) -> Result<Option<u32>, QueryError> {
    value(raw)
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| QueryError::NotANumber {
                name,
                value: raw.to_string(),
            })
        })
        .transpose()
}

// Currency bounds may arrive formatted, e.g. "$25,000"
fn amount(raw: &Option<String>, name: &'static str) -> Result<Option<u32>, QueryError> {
    value(raw)
        .map(|raw| {
            let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
            cleaned.trim().parse::<u32>().map_err(|_| QueryError::NotANumber {
                name,
                value: raw.to_string(),
            })
        })
        .transpose()
}

/// Parses the pagination parameters alone. Runs first so that a bad page
/// request never reaches the filter pipeline.
pub fn parse_pagination(params: &VehicleParams) -> Result<PaginationRequest, QueryError> {
    let page = number(&params.page, "page")?.unwrap_or(1);
    let page_size = number(&params.page_size, "pageSize")?.unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(PaginationRequest::new(page, page_size)?)
}

// Distance filtering only kicks in when lat, lng and a positive radius all parse
fn parse_radius(params: &VehicleParams) -> Option<RadiusFilter> {
    let lat = value(&params.lat)?.parse::<f64>().ok()?;
    let lng = value(&params.lng)?.parse::<f64>().ok()?;
    let radius = value(&params.radius)?.parse::<f64>().ok()?;
    if radius <= 0.0 {
        return None;
    }
    RadiusFilter::new(GeoPoint::new(lat, lng), radius)
}

fn parse_sort(params: &VehicleParams) -> Result<Option<SortSpec>, QueryError> {
    let field = value(&params.sort_by).map(str::parse::<SortField>).transpose()?;
    let order = value(&params.sort_order).map(str::parse::<SortOrder>).transpose()?;

    if field.is_none() && order.is_none() {
        return Ok(None);
    }
    Ok(Some(SortSpec {
        field: field.unwrap_or_default(),
        order: order.unwrap_or_default(),
    }))
}

pub fn parse_criteria(params: &VehicleParams) -> Result<FilterCriteria, QueryError> {
    Ok(FilterCriteria {
        condition: list(&params.condition),
        make: list(&params.make),
        model: list(&params.model),
        trim: list(&params.trim),
        vehicle_type: list(&params.vehicle_type),
        drive_type: list(&params.drive_type),
        exterior_color: list(&params.exterior_color),
        seller_type: list(&params.seller_type),
        search: value(&params.search).map(String::from),
        mileage: number(&params.mileage, "mileage")?.map(MileageFilter::from_menu_value),
        price: Bounds {
            min: amount(&params.price_min, "priceMin")?,
            max: amount(&params.price_max, "priceMax")?,
        },
        payment: Bounds {
            min: amount(&params.payment_min, "paymentMin")?,
            max: amount(&params.payment_max, "paymentMax")?,
        },
        radius: parse_radius(params),
    })
}

/// Full normalization of a listing request. Unknown parameters never reach
/// this point; the extractor drops them.
pub fn parse_vehicle_query(params: &VehicleParams) -> Result<VehicleQuery, QueryError> {
    let pagination = parse_pagination(params)?;
    let criteria = parse_criteria(params)?;
    let sort = parse_sort(params)?;
    Ok(VehicleQuery {
        criteria,
        sort,
        pagination,
    })
}
