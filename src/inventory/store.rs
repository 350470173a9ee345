// The query interface every inventory backend exposes, and the in-memory
// synthetic implementation of it

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::inventory::filter::{admit, Candidate, FilterCriteria, AWD_OR_4WD};
use crate::inventory::generator;
use crate::inventory::paginate::{paginate, sort_listings, PaginationMeta, PaginationRequest, SortSpec};
use crate::models::{FacetCount, FilterOptions, ListedVehicle, SellerType, VehicleRecord};

/// A normalized listing query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleQuery {
    pub criteria: FilterCriteria,
    /// `None` picks the default order: nearest first for radius queries,
    /// newest first otherwise.
    pub sort: Option<SortSpec>,
    pub pagination: PaginationRequest,
}

impl VehicleQuery {
    pub fn effective_sort(&self) -> SortSpec {
        self.sort.unwrap_or(if self.criteria.radius.is_some() {
            SortSpec::NEAREST_FIRST
        } else {
            SortSpec::NEWEST_FIRST
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePage {
    pub data: Vec<ListedVehicle>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Dealer,
    VehicleType,
}

pub trait VehicleStore: Send + Sync {
    fn query(&self, query: &VehicleQuery) -> Result<VehiclePage>;

    fn get(&self, id: u64) -> Option<VehicleRecord>;

    fn filter_options(&self) -> FilterOptions;

    /// Listing counts per facet value, most common first.
    fn facet_counts(&self, facet: Facet) -> Vec<FacetCount>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only catalog held in memory. Records are kept sorted by id.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    vehicles: Vec<VehicleRecord>,
}

impl Inventory {
    pub fn generate(size: usize, seed: Option<u64>) -> Self {
        Self {
            vehicles: generator::generate_seeded(size, seed),
        }
    }

    pub fn from_records(mut vehicles: Vec<VehicleRecord>) -> Self {
        vehicles.sort_by_key(|v| v.id);
        vehicles.dedup_by_key(|v| v.id);
        Self { vehicles }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.vehicles
    }
}

impl VehicleStore for Inventory {
    fn query(&self, query: &VehicleQuery) -> Result<VehiclePage> {
        let mut matched: Vec<Candidate<'_>> = self
            .vehicles
            .iter()
            .filter_map(|v| admit(v, &query.criteria))
            .collect();

        sort_listings(&mut matched, query.effective_sort());
        let (page, meta) = paginate(matched, &query.pagination);
        let data: Vec<ListedVehicle> = page.iter().map(Candidate::to_listed).collect();
        tracing::debug!(
            total = meta.total_records,
            page = meta.current_page,
            returned = data.len(),
            "Inventory query complete"
        );
        Ok(VehiclePage { data, meta })
    }

    fn get(&self, id: u64) -> Option<VehicleRecord> {
        self.vehicles
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|index| self.vehicles[index].clone())
    }

    fn filter_options(&self) -> FilterOptions {
        let mut makes = BTreeSet::new();
        let mut models: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut conditions = BTreeSet::new();
        let mut seller_types = BTreeSet::new();
        let mut vehicle_types = BTreeSet::new();
        let mut exterior_colors = BTreeSet::new();

        for v in &self.vehicles {
            makes.insert(v.make.clone());
            models.entry(v.make.clone()).or_default().insert(v.model.clone());
            conditions.insert(v.condition.as_str());
            seller_types.insert(v.seller.seller_type);
            vehicle_types.insert(v.body_style.clone());
            exterior_colors.insert(v.exterior_color.clone());
        }

        FilterOptions {
            makes: makes.into_iter().collect(),
            models: models
                .into_iter()
                .map(|(make, set)| (make, set.into_iter().collect()))
                .collect(),
            conditions: conditions.into_iter().map(String::from).collect(),
            // The storefront menu groups the two all-wheel variants
            drive_types: vec![AWD_OR_4WD.to_string(), "FWD".to_string(), "RWD".to_string()],
            seller_types: seller_types
                .into_iter()
                .map(|s: SellerType| s.as_str().to_string())
                .collect(),
            vehicle_types: vehicle_types.into_iter().collect(),
            exterior_colors: exterior_colors.into_iter().collect(),
        }
    }

    fn facet_counts(&self, facet: Facet) -> Vec<FacetCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for v in &self.vehicles {
            let key = match facet {
                Facet::Dealer => v.seller.dealer.as_str(),
                Facet::VehicleType => v.body_style.as_str(),
            };
            *counts.entry(key).or_default() += 1;
        }

        let mut summary: Vec<FacetCount> = counts
            .into_iter()
            .map(|(name, count)| FacetCount {
                name: name.to_string(),
                count,
            })
            .collect();
        summary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        summary
    }

    fn len(&self) -> usize {
        self.vehicles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::filter::Bounds;
    use crate::inventory::geo::{GeoPoint, RadiusFilter};
    use crate::inventory::paginate::{SortField, SortOrder};
    use crate::models::Condition;

    fn inventory() -> Inventory {
        Inventory::generate(5_000, Some(21))
    }

    fn page(page: u32, size: u32) -> PaginationRequest {
        PaginationRequest::new(page, size).unwrap()
    }

    #[test]
    fn unfiltered_first_page_of_fifty_thousand() {
        let inventory = Inventory::generate(50_000, Some(1));
        let result = inventory.query(&VehicleQuery::default()).unwrap();

        assert_eq!(result.data.len(), 20);
        assert_eq!(result.meta.total_records, 50_000);
        assert_eq!(result.meta.total_pages, 2500);
        assert!(result.meta.has_next_page);
        assert!(!result.meta.has_previous_page);
        assert_eq!(result.data[0].record.id, 50_000);
        assert!(result.data.iter().all(|v| v.distance_miles.is_none()));
    }

    #[test]
    fn condition_and_make_filter() {
        let inventory = inventory();
        let query = VehicleQuery {
            criteria: FilterCriteria {
                condition: vec!["New".into()],
                make: vec!["Audi".into()],
                ..Default::default()
            },
            pagination: page(1, 100),
            ..Default::default()
        };
        let result = inventory.query(&query).unwrap();
        let expected = inventory
            .records()
            .iter()
            .filter(|v| v.condition == Condition::New && v.make == "Audi")
            .count();

        assert!(expected > 0);
        assert_eq!(result.meta.total_records, expected);
        assert!(result
            .data
            .iter()
            .all(|v| v.record.condition == Condition::New && v.record.make == "Audi"));
    }

    #[test]
    fn no_matches_yields_zero_pages() {
        let query = VehicleQuery {
            criteria: FilterCriteria {
                make: vec!["Yugo".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let result = inventory().query(&query).unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.meta.total_records, 0);
        assert_eq!(result.meta.total_pages, 0);
        assert!(!result.meta.has_next_page);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let query = VehicleQuery {
            pagination: page(10_000, 20),
            ..Default::default()
        };
        let result = inventory().query(&query).unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.meta.total_records, 5_000);
        assert!(result.meta.has_previous_page);
    }

    #[test]
    fn pages_do_not_overlap() {
        let inventory = inventory();
        let criteria = FilterCriteria {
            price: Bounds { min: Some(30_000), max: None },
            ..Default::default()
        };
        let sort = Some(SortSpec { field: SortField::Price, order: SortOrder::Asc });
        let first = inventory
            .query(&VehicleQuery { criteria: criteria.clone(), sort, pagination: page(1, 50) })
            .unwrap();
        let second = inventory
            .query(&VehicleQuery { criteria, sort, pagination: page(2, 50) })
            .unwrap();

        let last_of_first = first.data.last().unwrap();
        let first_of_second = second.data.first().unwrap();
        assert!(last_of_first.record.sale_price <= first_of_second.record.sale_price);
        assert!(first.data.iter().all(|a| second.data.iter().all(|b| a.record.id != b.record.id)));
    }

    #[test]
    fn radius_query_reports_distance_nearest_first() {
        let tacoma = GeoPoint::new(47.2529, -122.4443);
        let query = VehicleQuery {
            criteria: FilterCriteria {
                radius: RadiusFilter::new(tacoma, 15.0),
                ..Default::default()
            },
            pagination: page(1, 100),
            ..Default::default()
        };
        let result = inventory().query(&query).unwrap();

        assert!(result.meta.total_records > 0);
        let distances: Vec<f64> = result
            .data
            .iter()
            .map(|v| v.distance_miles.expect("radius results carry distance"))
            .collect();
        assert!(distances.iter().all(|d| *d <= 15.0));
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn radius_query_skips_records_without_coordinates() {
        let mut records = crate::inventory::generator::generate_seeded(10, Some(2));
        for record in &mut records {
            record.location.coordinates = None;
        }
        let inventory = Inventory::from_records(records);
        let query = VehicleQuery {
            criteria: FilterCriteria {
                radius: RadiusFilter::new(GeoPoint::new(47.5, -122.3), 10_000.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(inventory.query(&query).unwrap().meta.total_records, 0);
    }

    #[test]
    fn page_records_match_the_catalog() {
        let inventory = inventory();
        let query = VehicleQuery {
            sort: Some(SortSpec { field: SortField::Mileage, order: SortOrder::Desc }),
            pagination: page(3, 25),
            ..Default::default()
        };
        let result = inventory.query(&query).unwrap();

        assert_eq!(result.data.len(), 25);
        for listed in &result.data {
            assert_eq!(inventory.get(listed.record.id).as_ref(), Some(&listed.record));
        }
        assert!(result.data.windows(2).all(|w| w[0].record.mileage >= w[1].record.mileage));
    }

    #[test]
    fn get_by_id() {
        let inventory = inventory();
        assert_eq!(inventory.get(17).map(|v| v.id), Some(17));
        assert!(inventory.get(0).is_none());
        assert!(inventory.get(5_001).is_none());
    }

    #[test]
    fn filter_options_are_sorted_and_complete() {
        let options = inventory().filter_options();
        assert_eq!(options.conditions, vec!["Certified", "New", "Used"]);
        assert_eq!(options.drive_types, vec!["AWD/4WD", "FWD", "RWD"]);
        assert_eq!(options.seller_types, vec!["Dealer", "Private Seller"]);
        assert!(options.makes.windows(2).all(|w| w[0] < w[1]));
        assert!(options.models["Audi"].contains(&"Q5".to_string()));
    }

    #[test]
    fn facet_counts_add_up() {
        let inventory = inventory();
        for facet in [Facet::Dealer, Facet::VehicleType] {
            let counts = inventory.facet_counts(facet);
            assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), inventory.len());
            assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }
}
