use std::collections::HashMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::colour::{gradient_positions, GradientCache};
use crate::error::ReconcileError;
use crate::model::sort_by_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCategory {
    pub id: i32,
    pub name: String,
    /// Comma separated gradient stops.
    pub colour: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: i32,
    pub team_id: i32,
    pub category_id: i32,
    pub name: String,
    pub colour: Option<String>,
    /// Serialized `[{ "start": "08:00", "end": "10:00", "volunteers": 2 }]`.
    pub demand: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShiftData {
    pub teams: Vec<Team>,
    pub categories: Vec<ShiftCategory>,
    pub shifts: Vec<Shift>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedShift {
    pub id: i32,
    pub team_id: i32,
    pub category_id: i32,
    pub name: String,
    pub colour: String,
    pub demand_minutes: u32,
}

/// Picks a display colour for every shift and computes its demand.
///
/// Shifts without an explicit colour are spread along their category's
/// gradient, grouped per category and team in input order.
pub fn resolve_shifts(
    data: &ShiftData,
    cache: &mut GradientCache,
) -> Result<Vec<ResolvedShift>, ReconcileError> {
    let categories: HashMap<i32, &ShiftCategory> = data
        .categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let mut group_sizes: HashMap<(i32, i32), usize> = HashMap::new();
    for shift in &data.shifts {
        if !categories.contains_key(&shift.category_id) {
            return Err(ReconcileError::UnknownShiftCategory {
                shift_id: shift.id,
                category_id: shift.category_id,
            });
        }
        if shift.colour.is_none() {
            *group_sizes
                .entry((shift.category_id, shift.team_id))
                .or_default() += 1;
        }
    }

    let mut group_indices: HashMap<(i32, i32), usize> = HashMap::new();
    let mut resolved = Vec::with_capacity(data.shifts.len());
    for shift in &data.shifts {
        let colour = if let Some(colour) = &shift.colour {
            colour.clone()
        } else {
            let key = (shift.category_id, shift.team_id);
            let index = group_indices.entry(key).or_default();
            let positions = gradient_positions(group_sizes[&key]);
            let position = positions[*index];
            *index += 1;
            cache
                .get(&categories[&shift.category_id].colour)?
                .at(position)
                .to_css()
        };
        resolved.push(ResolvedShift {
            id: shift.id,
            team_id: shift.team_id,
            category_id: shift.category_id,
            name: shift.name.clone(),
            colour,
            demand_minutes: calculate_demand_minutes(&shift.demand),
        });
    }
    Ok(resolved)
}

#[derive(Deserialize)]
struct DemandRange {
    start: String,
    end: String,
    volunteers: u32,
}

#[derive(Error, Debug)]
enum DemandError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("time error: {0}")]
    Time(#[from] chrono::ParseError),
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

fn demand_minutes(serialized: &str) -> Result<u32, DemandError> {
    let ranges: Vec<DemandRange> = serde_json::from_str(serialized)?;
    let mut total: u32 = 0;
    for range in ranges {
        let start = parse_time(&range.start)?;
        let end = parse_time(&range.end)?;
        let mut minutes = (end - start).num_minutes();
        if minutes < 0 {
            // the range ends on the next day
            minutes += 24 * 60;
        }
        let minutes = u32::try_from(minutes).unwrap_or_default();
        total = total.saturating_add(minutes.saturating_mul(range.volunteers));
    }
    Ok(total)
}

/// Sum of `(end - start) * volunteers` over all ranges. Broken input counts as
/// no demand.
#[must_use]
pub fn calculate_demand_minutes(serialized: &str) -> u32 {
    if serialized.trim().is_empty() {
        return 0;
    }
    match demand_minutes(serialized) {
        Ok(minutes) => minutes,
        Err(error) => {
            warn!("ignoring invalid shift demand {serialized:?}: {error}");
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandTotal {
    pub id: i32,
    pub name: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandSummary {
    pub teams: Vec<DemandTotal>,
    pub categories: Vec<DemandTotal>,
    pub total_minutes: u32,
}

#[must_use]
pub fn summarise_demand(data: &ShiftData, shifts: &[ResolvedShift]) -> DemandSummary {
    let totals = |names: Vec<(i32, &str)>, key: fn(&ResolvedShift) -> i32| {
        let mut totals: Vec<DemandTotal> = names
            .into_iter()
            .map(|(id, name)| DemandTotal {
                id,
                name: name.to_owned(),
                minutes: shifts
                    .iter()
                    .filter(|shift| key(shift) == id)
                    .fold(0, |sum: u32, shift| sum.saturating_add(shift.demand_minutes)),
            })
            .collect();
        sort_by_name(&mut totals, |total| total.name.as_str());
        totals
    };

    DemandSummary {
        teams: totals(
            data.teams
                .iter()
                .map(|team| (team.id, team.name.as_str()))
                .collect(),
            |shift| shift.team_id,
        ),
        categories: totals(
            data.categories
                .iter()
                .map(|category| (category.id, category.name.as_str()))
                .collect(),
            |shift| shift.category_id,
        ),
        total_minutes: shifts
            .iter()
            .fold(0, |sum: u32, shift| sum.saturating_add(shift.demand_minutes)),
    }
}
