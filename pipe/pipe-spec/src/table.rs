//! The static specification table.
//!
//! Dimensions follow ASME B36.10 for outer diameter and wall, with NPT
//! effective thread length (L2) and pitch converted from the inch tables.
//! The table is expanded into [`PipeSpec`] records once, on first use, and
//! shared read-only afterwards.

use std::sync::OnceLock;

use hashbrown::HashMap;

use crate::schedule::Schedule;
use crate::spec::PipeSpec;

/// Nominal size data shared by every schedule:
/// `(name, dn, od, thread length, thread pitch)`.
const SIZES: [(&str, &str, f64, f64, f64); 18] = [
    ("1/8", "DN6", 10.3, 6.703_06, 0.940_816),
    ("1/4", "DN8", 13.7, 10.205_72, 1.411_224),
    ("3/8", "DN10", 17.1, 10.358_12, 1.411_224),
    ("1/2", "DN15", 21.3, 13.555_98, 1.814_322),
    ("3/4", "DN20", 26.7, 13.860_78, 1.814_322),
    ("1", "DN25", 33.4, 17.343_12, 2.208_784),
    ("1-1/4", "DN32", 42.2, 17.952_72, 2.208_784),
    ("1-1/2", "DN40", 48.3, 18.376_9, 2.208_784),
    ("2", "DN50", 60.3, 19.215_1, 2.208_784),
    ("2-1/2", "DN65", 73.0, 28.892_5, 3.175),
    ("3", "DN80", 88.9, 30.48, 3.175),
    ("3-1/2", "DN90", 101.6, 31.75, 3.175),
    ("4", "DN100", 114.3, 33.02, 3.175),
    ("5", "DN125", 141.3, 35.720_02, 3.175),
    ("6", "DN150", 168.3, 38.417_5, 3.175),
    ("8", "DN200", 219.1, 43.497_5, 3.175),
    ("10", "DN250", 273.0, 48.895, 3.175),
    ("12", "DN300", 323.8, 53.975, 3.175),
];

/// Wall thickness per size, in `SIZES` order; `None` where the schedule
/// does not list the size.
const WALLS: [(Schedule, [Option<f64>; 18]); 5] = [
    (
        Schedule::Sch10,
        [
            Some(1.24),
            Some(1.65),
            Some(1.65),
            Some(2.11),
            Some(2.11),
            Some(2.77),
            Some(2.77),
            Some(2.77),
            Some(2.77),
            Some(3.05),
            Some(3.05),
            Some(3.05),
            Some(3.05),
            Some(3.40),
            Some(3.40),
            Some(3.76),
            Some(4.19),
            Some(4.57),
        ],
    ),
    (
        Schedule::Sch40,
        [
            Some(1.73),
            Some(2.4),
            Some(2.4),
            Some(2.77),
            Some(2.87),
            Some(3.38),
            Some(3.56),
            Some(3.68),
            Some(3.91),
            Some(5.16),
            Some(5.49),
            Some(5.74),
            Some(6.02),
            Some(6.55),
            Some(7.11),
            Some(8.18),
            Some(9.27),
            Some(10.31),
        ],
    ),
    (
        Schedule::Sch80,
        [
            Some(2.41),
            Some(3.02),
            Some(3.20),
            Some(3.73),
            Some(3.91),
            Some(4.55),
            Some(4.85),
            Some(5.08),
            Some(5.54),
            Some(7.01),
            Some(7.62),
            Some(8.08),
            Some(8.56),
            Some(9.53),
            Some(10.97),
            Some(12.70),
            Some(15.09),
            Some(17.48),
        ],
    ),
    (
        Schedule::Sch120,
        [
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Some(11.13),
            Some(12.70),
            Some(14.27),
            Some(18.26),
            Some(21.44),
            Some(25.40),
        ],
    ),
    (
        Schedule::Sch160,
        [
            None,
            None,
            None,
            Some(4.78),
            Some(5.56),
            Some(6.35),
            Some(6.35),
            Some(7.14),
            Some(8.74),
            Some(9.53),
            Some(11.13),
            None,
            Some(13.49),
            Some(15.88),
            Some(18.26),
            Some(23.01),
            Some(28.58),
            Some(33.32),
        ],
    ),
];

struct Table {
    records: Vec<PipeSpec>,
    by_schedule: HashMap<Schedule, Vec<usize>>,
}

static TABLE: OnceLock<Table> = OnceLock::new();

fn build() -> Table {
    let mut records = Vec::new();
    let mut by_schedule: HashMap<Schedule, Vec<usize>> = HashMap::new();

    for (schedule, walls) in &WALLS {
        for ((name, dn, od, tl, pitch), wall) in SIZES.iter().zip(walls) {
            let Some(wall) = wall else { continue };
            by_schedule
                .entry(*schedule)
                .or_default()
                .push(records.len());
            records.push(PipeSpec::new(*schedule, *name, *dn, *od, *wall).with_thread(*tl, *pitch));
        }
    }

    tracing::debug!(records = records.len(), "built pipe spec table");
    Table {
        records,
        by_schedule,
    }
}

fn get() -> &'static Table {
    TABLE.get_or_init(build)
}

/// Every record in the table, grouped by schedule, sizes ascending.
#[must_use]
pub fn table() -> &'static [PipeSpec] {
    &get().records
}

/// The records of one schedule, sizes ascending.
///
/// # Example
///
/// ```
/// use pipe_spec::{specs_for, Schedule};
///
/// let sch120: Vec<_> = specs_for(Schedule::Sch120).collect();
/// assert_eq!(sch120.first().map(|s| s.name()), Some("4"));
/// ```
pub fn specs_for(schedule: Schedule) -> impl Iterator<Item = &'static PipeSpec> {
    let table = get();
    table
        .by_schedule
        .get(&schedule)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(move |&i| &table.records[i])
}
