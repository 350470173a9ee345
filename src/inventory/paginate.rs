//! Result ordering, page slicing and page metadata.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

use crate::inventory::filter::Candidate;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Page number must be greater than 0")]
    PageOutOfRange,
    #[error("Page size must be between 1 and 100")]
    PageSizeOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("Unsupported sortBy '{0}'. Use one of: id, price, payment, mileage, year, distance")]
    UnknownField(String),
    #[error("Unsupported sortOrder '{0}'. Use asc or desc")]
    UnknownOrder(String),
}

/// A validated 1-based page request. Construct with [`PaginationRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    page: u32,
    page_size: u32,
}

impl PaginationRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageOutOfRange);
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(PaginationError::PageSizeOutOfRange);
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_records: usize,
    pub total_pages: usize,
    pub current_page: u32,
    pub page_size: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn compute(total_records: usize, request: &PaginationRequest) -> Self {
        let total_pages = total_records.div_ceil(request.page_size as usize);
        Self {
            total_records,
            total_pages,
            current_page: request.page,
            page_size: request.page_size,
            has_next_page: (request.page as usize) < total_pages,
            has_previous_page: request.page > 1,
        }
    }

    /// Metadata reported alongside a failed query.
    pub fn zeroed() -> Self {
        Self::compute(0, &PaginationRequest::default())
    }
}

/// Slices one page out of `items`. Pages past the end are empty, not errors.
pub fn paginate<T>(items: Vec<T>, request: &PaginationRequest) -> (Vec<T>, PaginationMeta) {
    let meta = PaginationMeta::compute(items.len(), request);
    let page = items
        .into_iter()
        .skip(request.offset())
        .take(request.page_size as usize)
        .collect();
    (page, meta)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Price,
    Payment,
    Mileage,
    Year,
    Distance,
}

impl FromStr for SortField {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "price" | "salePrice" => Ok(SortField::Price),
            "payment" => Ok(SortField::Payment),
            "mileage" => Ok(SortField::Mileage),
            "year" => Ok(SortField::Year),
            "distance" => Ok(SortField::Distance),
            other => Err(SortError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(SortError::UnknownOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub const NEWEST_FIRST: SortSpec = SortSpec {
        field: SortField::Id,
        order: SortOrder::Desc,
    };
    pub const NEAREST_FIRST: SortSpec = SortSpec {
        field: SortField::Distance,
        order: SortOrder::Asc,
    };
}

/// Stable sort by `sort`, ties broken by id descending so that repeated
/// queries page through the same sequence.
pub fn sort_listings(items: &mut [Candidate<'_>], sort: SortSpec) {
    items.sort_by(|a, b| {
        compare(a, b, sort).then_with(|| b.record.id.cmp(&a.record.id))
    });
}

fn compare(a: &Candidate<'_>, b: &Candidate<'_>, sort: SortSpec) -> Ordering {
    let (ra, rb) = (a.record, b.record);
    match sort.field {
        SortField::Id => sort.order.apply(ra.id.cmp(&rb.id)),
        SortField::Year => sort.order.apply(ra.year.cmp(&rb.year)),
        SortField::Mileage => sort.order.apply(ra.mileage.cmp(&rb.mileage)),
        SortField::Price => compare_present(ra.sale_price, rb.sale_price, sort.order),
        SortField::Payment => compare_present(ra.payment, rb.payment, sort.order),
        SortField::Distance => compare_present(a.distance_miles, b.distance_miles, sort.order),
    }
}

// Values that are present always come before missing ones, whatever the direction
fn compare_present<T: PartialOrd>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => order.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::generator::generate_seeded;
    use crate::models::VehicleRecord;

    fn request(page: u32, page_size: u32) -> PaginationRequest {
        PaginationRequest::new(page, page_size).unwrap()
    }

    #[test]
    fn rejects_out_of_range_requests() {
        assert_eq!(PaginationRequest::new(0, 20), Err(PaginationError::PageOutOfRange));
        assert_eq!(PaginationRequest::new(1, 0), Err(PaginationError::PageSizeOutOfRange));
        assert_eq!(PaginationRequest::new(1, 101), Err(PaginationError::PageSizeOutOfRange));
        assert!(PaginationRequest::new(1, 100).is_ok());
    }

    #[test]
    fn meta_for_fifty_thousand_records() {
        let meta = PaginationMeta::compute(50_000, &request(1, 20));
        assert_eq!(meta.total_pages, 2500);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);

        let last = PaginationMeta::compute(50_000, &request(2500, 20));
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);
    }

    #[test]
    fn total_pages_rounds_up_and_is_zero_when_empty() {
        assert_eq!(PaginationMeta::compute(41, &request(1, 20)).total_pages, 3);
        assert_eq!(PaginationMeta::compute(40, &request(1, 20)).total_pages, 2);

        let empty = PaginationMeta::compute(0, &request(1, 20));
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
        assert!(!empty.has_previous_page);
    }

    #[test]
    fn slice_lengths_follow_offset() {
        let items: Vec<u32> = (0..45).collect();
        for page in 1..=5 {
            let req = request(page, 20);
            let (slice, _) = paginate(items.clone(), &req);
            let expected = 20.min(45usize.saturating_sub(req.offset()));
            assert_eq!(slice.len(), expected, "page {page}");
        }

        let (third, _) = paginate(items, &request(3, 20));
        assert_eq!(third, vec![40, 41, 42, 43, 44]);
    }

    #[test]
    fn zeroed_meta_reports_defaults() {
        let meta = PaginationMeta::zeroed();
        assert_eq!(meta.total_records, 0);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.page_size, DEFAULT_PAGE_SIZE);
    }

    fn candidates(records: &[VehicleRecord]) -> Vec<Candidate<'_>> {
        records
            .iter()
            .map(|record| Candidate {
                record,
                distance_miles: None,
            })
            .collect()
    }

    #[test]
    fn default_sort_is_newest_first() {
        let records = generate_seeded(30, Some(3));
        let mut items = candidates(&records);
        sort_listings(&mut items, SortSpec::NEWEST_FIRST);
        let ids: Vec<u64> = items.iter().map(|v| v.record.id).collect();
        assert_eq!(ids, (1..=30).rev().collect::<Vec<_>>());
    }

    #[test]
    fn price_sort_puts_unpriced_last_and_breaks_ties_by_id() {
        let records = generate_seeded(400, Some(11));
        let mut items = candidates(&records);
        for sort in [
            SortSpec { field: SortField::Price, order: SortOrder::Asc },
            SortSpec { field: SortField::Price, order: SortOrder::Desc },
        ] {
            sort_listings(&mut items, sort);
            let first_unpriced = items
                .iter()
                .position(|v| v.record.sale_price.is_none())
                .unwrap_or(items.len());
            assert!(items[first_unpriced..].iter().all(|v| v.record.sale_price.is_none()));

            for pair in items[..first_unpriced].windows(2) {
                let (a, b) = (pair[0].record.sale_price, pair[1].record.sale_price);
                match sort.order {
                    SortOrder::Asc => assert!(a <= b),
                    SortOrder::Desc => assert!(a >= b),
                }
                if a == b {
                    assert!(pair[0].record.id > pair[1].record.id);
                }
            }
        }
    }

    #[test]
    fn parses_sort_parameters() {
        assert_eq!("mileage".parse::<SortField>(), Ok(SortField::Mileage));
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!(
            "colour".parse::<SortField>(),
            Err(SortError::UnknownField("colour".into()))
        );
        assert_eq!(
            "sideways".parse::<SortOrder>(),
            Err(SortError::UnknownOrder("sideways".into()))
        );
    }

    #[test]
    fn only_the_requested_page_is_materialized() {
        let records = generate_seeded(250, Some(6));
        let mut items = candidates(&records);
        sort_listings(&mut items, SortSpec { field: SortField::Year, order: SortOrder::Asc });

        let (page, meta) = paginate(items, &request(2, 20));
        assert_eq!(meta.total_records, 250);
        let listed: Vec<_> = page.iter().map(Candidate::to_listed).collect();
        assert_eq!(listed.len(), 20);
        for (candidate, vehicle) in page.iter().zip(&listed) {
            assert_eq!(&vehicle.record, candidate.record);
        }
        assert!(listed.windows(2).all(|w| w[0].record.year <= w[1].record.year));
    }
}
