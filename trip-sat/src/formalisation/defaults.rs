//! Fixed domain assumptions used when formalising a trip.

/// Assumed trip length in days when no duration is given.
pub const DURATION_DAYS: i64 = 3;

/// The last day of the planning horizon; trip days range over `0..=PLANNING_HORIZON_DAYS`.
pub const PLANNING_HORIZON_DAYS: f64 = 365.0;

/// Nightly price of a hotel which does not state one.
pub const NIGHTLY_RATE: f64 = 100.0;

/// Cheapest and most expensive nightly rate assumed when no hotel prices are known.
pub const MIN_NIGHTLY_RATE: f64 = 50.0;
pub const MAX_NIGHTLY_RATE: f64 = 300.0;

/// Estimated cost of a single activity.
pub const AVERAGE_ACTIVITY_COST: f64 = 25.0;

/// Activities which can be fitted into a single day, at most.
pub const ACTIVITIES_PER_DAY_ESTIMATE: f64 = 2.0;

pub const MIN_ACTIVITIES_PER_DAY: f64 = 0.5;
pub const MAX_ACTIVITIES_PER_DAY: f64 = 4.0;

/// A plan always contains at least this many activities.
pub const MIN_TOTAL_ACTIVITIES: f64 = 1.0;
