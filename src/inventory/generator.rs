// Synthetic catalog generation
// Field values are drawn independently except where a listing has to stay
// self-consistent: make→model, condition→mileage, price→payment.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::inventory::geo::GeoPoint;
use crate::models::{Condition, Drivetrain, Location, Seller, SellerType, VehicleRecord};

pub const DEFAULT_INVENTORY_SIZE: usize = 50_000;

const MAKES_AND_MODELS: &[(&str, &[&str])] = &[
    ("Audi", &["A3", "A4", "A6", "Q5", "Q7", "Q8"]),
    ("BMW", &["3 Series", "5 Series", "X3", "X5", "X7"]),
    ("Chevrolet", &["Silverado", "Equinox", "Malibu", "Traverse", "Camaro", "Tahoe"]),
    ("Ford", &["F-150", "Escape", "Explorer", "Mustang", "Edge", "Expedition", "Ranger"]),
    ("Honda", &["Civic", "Accord", "CR-V", "Pilot", "HR-V"]),
    ("Hyundai", &["Elantra", "Sonata", "Tucson", "Santa Fe", "Palisade"]),
    ("Mercedes-Benz", &["C-Class", "E-Class", "GLC", "GLE", "S-Class", "A-Class"]),
    ("Nissan", &["Altima", "Sentra", "Rogue", "Pathfinder", "Murano"]),
];

const TRIMS: &[&str] = &[
    "Base", "LX", "EX", "EX-L", "Touring", "Sport", "Limited", "Premium", "Luxury", "SE", "SL",
    "SR", "Platinum", "Lariat", "XLT",
];
const TRANSMISSIONS: &[&str] = &["Auto", "CVT", "Manual"];
const DOORS: &[&str] = &["2 doors", "4 doors"];
const BODY_STYLES: &[&str] = &[
    "Sedan",
    "SUV / Crossover",
    "Truck",
    "Coupe",
    "Convertible",
    "Hatchback",
    "Van / Minivan",
    "Wagon",
];
const EXTERIOR_COLORS: &[&str] = &[
    "Black", "White", "Silver", "Gray", "Blue", "Red", "Green", "Brown",
];

const DEALERS: &[&str] = &[
    "Bayside Ford",
    "Premium Auto Group",
    "Downtown Honda",
    "City Toyota",
    "Luxury Motors",
    "Northwest Chevrolet",
    "Eastside BMW",
    "Metro Audi",
    "Pacific Mercedes-Benz",
    "Summit Hyundai",
    "Valley Nissan",
];

// (city, state, zip, lat, lng)
const LOCATIONS: &[(&str, &str, &str, f64, f64)] = &[
    ("Lakewood", "WA", "98499", 47.1718, -122.5185),
    ("Tacoma", "WA", "98402", 47.2529, -122.4443),
    ("Federal Way", "WA", "98003", 47.3223, -122.3126),
    ("Seattle", "WA", "98101", 47.6101, -122.3344),
    ("Bellevue", "WA", "98004", 47.6101, -122.2015),
    ("Everett", "WA", "98201", 47.9790, -122.2021),
    ("Renton", "WA", "98057", 47.4829, -122.2171),
    ("Kent", "WA", "98032", 47.3809, -122.2348),
    ("Redmond", "WA", "98052", 47.6740, -122.1215),
    ("Bothell", "WA", "98011", 47.7601, -122.2054),
    ("Tukwila", "WA", "98168", 47.4740, -122.2610),
];

const SAMPLE_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=450&h=300&fit=crop",
    "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=450&h=300&fit=crop",
    "https://images.unsplash.com/photo-1617788138017-80ad40651399?w=450&h=300&fit=crop",
    "https://images.unsplash.com/photo-1606664515524-ed2f786a0bd6?w=450&h=300&fit=crop",
    "https://images.unsplash.com/photo-1563720223185-11003d516935?w=450&h=300&fit=crop",
    "https://images.unsplash.com/photo-1550355191-aa8a80b41353?w=450&h=300&fit=crop",
];

const PRICED_PROBABILITY: f64 = 0.85;
const FEATURED_PROBABILITY: f64 = 0.15;
const VIEWED_PROBABILITY: f64 = 0.30;

// All tables above are non-empty, so indexing by gen_range cannot go out of bounds
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Generates `count` records with ids `1..=count`.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<VehicleRecord> {
    (1..=count as u64).map(|id| generate_record(id, rng)).collect()
}

/// Same as [`generate`], seeded for reproducibility when `seed` is given.
pub fn generate_seeded(count: usize, seed: Option<u64>) -> Vec<VehicleRecord> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate(count, &mut rng)
}

fn generate_record<R: Rng + ?Sized>(id: u64, rng: &mut R) -> VehicleRecord {
    let (make, models) = *pick(rng, MAKES_AND_MODELS);
    let model = *pick(rng, models);
    let year: u16 = rng.gen_range(2018..=2025);
    let trim = *pick(rng, TRIMS);
    let condition = *pick(rng, &Condition::ALL);
    let drivetrain = *pick(rng, &Drivetrain::ALL);

    let mileage: u32 = match condition {
        Condition::New => rng.gen_range(0..=50),
        Condition::Used | Condition::Certified => rng.gen_range(1_000..=120_000),
    };

    let base_price: f64 = rng.gen_range(25_000u32..=85_000) as f64;
    let year_factor = match condition {
        Condition::New => 1.0,
        _ => (1.0 - (2024.0 - year as f64) * 0.08).max(0.4),
    };
    let price = (base_price * year_factor).round() as u32;
    // Roughly sixty months with interest
    let monthly_payment = (price as f64 * 1.05 / 60.0).round() as u32;
    let has_price = rng.gen_bool(PRICED_PROBABILITY);

    let mut badges = vec![condition.as_str().to_string()];
    if drivetrain != Drivetrain::Fwd {
        badges.push(drivetrain.as_str().to_string());
    }

    let (city, state, zip, lat, lng) = *pick(rng, LOCATIONS);
    let seller = Seller {
        dealer: pick(rng, DEALERS).to_string(),
        seller_type: *pick(rng, &SellerType::ALL),
        account_number: format!("ACCT{}", rng.gen_range(1000u32..=9999)),
        phone: format!(
            "({}) {}-{}",
            rng.gen_range(200u32..=999),
            rng.gen_range(100u32..=999),
            rng.gen_range(1000u32..=9999)
        ),
    };

    VehicleRecord {
        id,
        title: format!("{year} {make} {model} {trim}"),
        year,
        make: make.to_string(),
        model: model.to_string(),
        trim: trim.to_string(),
        condition,
        drivetrain,
        transmission: pick(rng, TRANSMISSIONS).to_string(),
        doors: pick(rng, DOORS).to_string(),
        body_style: pick(rng, BODY_STYLES).to_string(),
        exterior_color: pick(rng, EXTERIOR_COLORS).to_string(),
        mileage,
        sale_price: has_price.then_some(price),
        payment: has_price.then_some(monthly_payment),
        seller,
        location: Location {
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
            coordinates: Some(GeoPoint::new(lat, lng)),
        },
        badges,
        featured: rng.gen_bool(FEATURED_PROBABILITY),
        viewed: rng.gen_bool(VIEWED_PROBABILITY),
        images: vec![pick(rng, SAMPLE_IMAGES).to_string()],
    }
}
