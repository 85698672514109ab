//! The names of all variables and constraints the formaliser creates.
//!
//! Names appear verbatim in solutions and unsatisfiable cores, so they are built in one place.
//! Fixed names are constants; names derived from the input are built by functions.

pub const START_DAY: &str = "start_day";
pub const END_DAY: &str = "end_day";
pub const TOTAL_COST: &str = "total_cost";
pub const ACCOMMODATION_COST: &str = "accommodation_cost";
pub const ACTIVITY_COST: &str = "activity_cost";
pub const CALCULATED_TOTAL: &str = "calculated_total";
pub const HOTEL_SELECTED: &str = "hotel_selected";
pub const ACTIVITIES_PER_DAY: &str = "activities_per_day";
pub const TOTAL_ACTIVITIES_PLANNED: &str = "total_activities_planned";

pub const VALID_DATE_RANGE: &str = "valid_date_range";
pub const ACCOMMODATION_COST_RANGE: &str = "accommodation_cost_range";
pub const ACTIVITY_COST_ESTIMATE: &str = "activity_cost_estimate";
pub const TOTAL_COST_CALCULATION: &str = "total_cost_calculation";
pub const BUDGET_LIMIT: &str = "budget_limit";
pub const CULTURE_PREFERENCE_SATISFIED: &str = "culture_preference_satisfied";
pub const BUDGET_PREFERENCE_CONSIDERED: &str = "budget_preference_considered";
pub const HOTEL_AVAILABILITY: &str = "hotel_availability";
pub const ACTIVITY_SCHEDULING_UPPER: &str = "activity_scheduling_upper";
pub const ACTIVITY_AVAILABILITY: &str = "activity_availability";
pub const MINIMUM_ACTIVITIES: &str = "minimum_activities";

/// The flag for the preference at position `index` with the given tag, e.g.
/// `preference_0_culture`.
///
/// The index makes the name unique even if a tag is repeated.
pub fn preference_flag(index: usize, tag: &str) -> String {
    format!("preference_{index}_{tag}")
}
