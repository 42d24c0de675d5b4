//! Pseudo-random employee synthesis from the fixed vocabularies.

use crate::vocab::{DEPARTMENTS, DESIGNATIONS, FIRST_NAMES, LAST_NAMES};
use crate::Employee;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Exclusive upper bound of the uniform offset into the past used for `dob`,
/// in milliseconds (about 31.7 years).
pub const DOB_WINDOW_MS: i64 = 1_000_000_000_000;

/// Synthesizes employees one at a time from a seeded RNG.
///
/// The generation epoch (the "now" that dates of birth are offset from) is
/// captured at construction, so a run is fully determined by its seed and
/// epoch.
pub struct Synthesizer {
    rng: StdRng,
    epoch: DateTime<Utc>,
}

impl Synthesizer {
    /// Create a synthesizer seeded for reproducible output.
    pub fn new(seed: u64) -> Self {
        Self::with_epoch(seed, Utc::now())
    }

    /// Create a synthesizer with an explicit generation epoch.
    pub fn with_epoch(seed: u64, epoch: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            epoch,
        }
    }

    /// Produce the employee with the given id.
    ///
    /// Infallible: vocabulary lookups index non-empty fixed arrays and all
    /// numeric ranges are closed on both ends.
    pub fn synthesize(&mut self, id: i64) -> Employee {
        let dob_offset = Duration::milliseconds(self.rng.random_range(0..DOB_WINDOW_MS));

        Employee {
            id,
            firstname: pick(&mut self.rng, &FIRST_NAMES).to_string(),
            lastname: pick(&mut self.rng, &LAST_NAMES).to_string(),
            dob: (self.epoch - dob_offset).date_naive(),
            hostel_room: format!("Room-{}", self.rng.random_range(100..=999)),
            ssn: format!(
                "{}-{}-{}",
                self.rng.random_range(100..=999),
                self.rng.random_range(10..=99),
                self.rng.random_range(1000..=9999)
            ),
            department: pick(&mut self.rng, &DEPARTMENTS).to_string(),
            designation: pick(&mut self.rng, &DESIGNATIONS).to_string(),
            salary: self.rng.random_range(40_000..=150_000),
            years_of_service: self.rng.random_range(0..=40),
        }
    }
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}
