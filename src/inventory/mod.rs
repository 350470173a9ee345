// In-memory vehicle inventory: generation, filtering, distance, ordering and paging

pub mod filter;
pub mod generator;
pub mod geo;
pub mod handle;
pub mod paginate;
pub mod store;

pub use handle::InventoryHandle;
pub use store::{Facet, Inventory, VehiclePage, VehicleQuery, VehicleStore};
