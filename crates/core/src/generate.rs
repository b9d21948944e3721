//! Synthetic record generation
//!
//! Produces the demo employee table: random names drawn from fixed
//! vocabularies, a department, a salary between 40k and 140k and a join date
//! within the last five years. Seeded generation is fully deterministic.

use crate::record::{Record, RecordId, RecordSet};
use chrono::{Days, Months, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default size of the generated table
pub const DEFAULT_RECORD_COUNT: usize = 500;

/// Lowest generated magnitude (inclusive)
pub const MIN_MAGNITUDE: u64 = 40_000;

/// Highest generated magnitude (exclusive)
pub const MAX_MAGNITUDE: u64 = 140_000;

const FIRST_NAMES: [&str; 20] = [
    "John", "Jane", "Michael", "Emily", "David", "Sarah", "Robert", "Jessica",
    "William", "Ashley", "James", "Jennifer", "Daniel", "Amanda", "Matthew",
    "Stephanie", "Christopher", "Nicole", "Andrew", "Elizabeth",
];

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin",
];

/// Department vocabulary
pub const DEPARTMENTS: [&str; 8] = [
    "Engineering",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Customer Support",
    "Product",
    "Design",
];

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of records to produce
    pub count: usize,
    /// Fixed seed for reproducible output (None = entropy)
    pub seed: Option<u64>,
    /// Upper bound for join dates (None = local today)
    pub today: Option<NaiveDate>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_RECORD_COUNT,
            seed: None,
            today: None,
        }
    }
}

impl GeneratorConfig {
    /// Seeded config with the given count
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed: Some(seed),
            today: None,
        }
    }
}

/// Generate a fresh record set
pub fn generate_records(config: &GeneratorConfig) -> RecordSet {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let today = config
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let records = record_ids(config.count)
        .map(|id| generate_record(&mut rng, id, today))
        .collect();

    RecordSet::new(records)
}

/// Ids `1..=count`, capped at `u32::MAX` rather than wrapping
fn record_ids(count: usize) -> impl Iterator<Item = u32> {
    (1..=u32::MAX).take(count)
}

fn generate_record<R: Rng>(rng: &mut R, id: u32, today: NaiveDate) -> Record {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or(FIRST_NAMES[0]);
    let last = LAST_NAMES.choose(rng).copied().unwrap_or(LAST_NAMES[0]);
    let category = DEPARTMENTS.choose(rng).copied().unwrap_or(DEPARTMENTS[0]);

    Record {
        id: RecordId(id),
        name: format!("{} {}", first, last),
        email: format!("{}.{}@company.com", first.to_lowercase(), last.to_lowercase()),
        category: category.to_string(),
        magnitude: rng.gen_range(MIN_MAGNITUDE..MAX_MAGNITUDE),
        joined: random_join_date(rng, today),
    }
}

/// Uniform date in `[today - 5 years, today]`
fn random_join_date<R: Rng>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let start = today.checked_sub_months(Months::new(60)).unwrap_or(today);
    let span = (today - start).num_days().max(0) as u64;
    start
        .checked_add_days(Days::new(rng.gen_range(0..=span)))
        .unwrap_or(today)
}
