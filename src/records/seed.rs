//! Synthetic sample data for demos.
//!
//! Each generated record picks a random district and one of its communes,
//! a year in 2021–2024 and plausible herd sizes. Slaughter is 40–60% of
//! the total herd and meat output assumes 80 kg per animal.

use rand::Rng;

use super::lookup::DISTRICTS;
use super::types::NewRecord;

/// Average carcass weight in kilograms used to derive meat output.
pub const KG_PER_ANIMAL: f64 = 80.0;

/// Generate `count` synthetic records.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<NewRecord> {
    (0..count).map(|_| generate_one(rng)).collect()
}

/// Generate a single synthetic record.
pub fn generate_one<R: Rng + ?Sized>(rng: &mut R) -> NewRecord {
    let (district, communes) = DISTRICTS[rng.random_range(0..DISTRICTS.len())];
    let commune = communes[rng.random_range(0..communes.len())];

    let buffalo_count: i64 = rng.random_range(50..=500);
    let cattle_count: i64 = rng.random_range(100..=1000);
    let pig_count: i64 = rng.random_range(500..=5000);
    let goat_count: i64 = rng.random_range(50..=300);

    let herd = buffalo_count + cattle_count + pig_count + goat_count;
    let ratio: f64 = rng.random_range(0.4..0.6);
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let slaughter_total = (herd as f64 * ratio).floor() as i64;

    NewRecord {
        district: district.to_string(),
        commune: commune.to_string(),
        year: rng.random_range(2021..=2024),
        buffalo_count,
        cattle_count,
        pig_count,
        goat_count,
        slaughter_total,
        meat_output_tons: meat_output_tons(slaughter_total),
    }
}

/// Meat output in tonnes for a slaughter count, rounded to two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn meat_output_tons(slaughter_total: i64) -> f64 {
    round2(slaughter_total as f64 * KG_PER_ANIMAL / 1000.0)
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
