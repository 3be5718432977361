use std::collections::HashMap;

use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use maud::{html, Markup};
use serde::Serialize;
use tracing::info;
use volunteer_manager_database::loaders::load_shift_data;
use volunteer_manager_database::models::EventRow;
use volunteer_manager_database::AsyncPgConnection;
use volunteer_manager_reconciler::shifts::{
    resolve_shifts, summarise_demand, DemandSummary, DemandTotal, ResolvedShift, ShiftData,
};
use volunteer_manager_reconciler::GradientCache;

use crate::components::main::main;
use crate::components::{format_minutes, section, table};
use crate::error::AppError;
use crate::routes::{respond, Format};
use crate::tables::EventSummary;

#[derive(Debug, Serialize)]
pub struct ShiftRow {
    #[serde(flatten)]
    pub shift: ResolvedShift,
    pub team: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ShiftsPage {
    pub event: EventSummary,
    pub shifts: Vec<ShiftRow>,
    pub demand: DemandSummary,
}

impl ShiftsPage {
    pub fn new(event: EventSummary, data: &ShiftData, resolved: Vec<ResolvedShift>) -> Self {
        let teams: HashMap<i32, &str> = data
            .teams
            .iter()
            .map(|team| (team.id, team.name.as_str()))
            .collect();
        let categories: HashMap<i32, &str> = data
            .categories
            .iter()
            .map(|category| (category.id, category.name.as_str()))
            .collect();
        let demand = summarise_demand(data, &resolved);
        let shifts = resolved
            .into_iter()
            .map(|shift| ShiftRow {
                team: teams.get(&shift.team_id).copied().unwrap_or_default().to_owned(),
                category: categories
                    .get(&shift.category_id)
                    .copied()
                    .unwrap_or_default()
                    .to_owned(),
                shift,
            })
            .collect();
        Self {
            event,
            shifts,
            demand,
        }
    }
}

pub async fn shifts(
    connection: &mut AsyncPgConnection,
    event: &EventRow,
    format: Format,
) -> Result<Response<Full<Bytes>>, AppError> {
    let data = load_shift_data(connection, event.event_id).await?;
    let mut cache = GradientCache::new();
    let resolved = resolve_shifts(&data, &mut cache)?;
    info!(
        event_id = event.event_id,
        shifts = resolved.len(),
        gradients = cache.len(),
        "resolved shifts"
    );
    let page = ShiftsPage::new(event.into(), &data, resolved);
    respond(format, &page, render)
}

fn totals(heading: &str, totals: &[DemandTotal]) -> Markup {
    table(
        &[heading, "Demand (hours)"],
        totals
            .iter()
            .map(|total| [total.name.clone(), format_minutes(total.minutes)]),
    )
}

pub fn render(page: &ShiftsPage) -> Markup {
    // the colour swatch is an attribute on the cell, so this table doesn't use `table`
    let schedule = html! {
        table {
            tr {
                th {}
                th { "Shift" }
                th { "Team" }
                th { "Category" }
                th { "Demand (hours)" }
            }
            @for row in &page.shifts {
                tr {
                    td style={ "background-color: " (row.shift.colour) } {}
                    td { (row.shift.name) }
                    td { (row.team) }
                    td { (row.category) }
                    td { (format_minutes(row.shift.demand_minutes)) }
                }
            }
        }
    };
    main(
        &format!("{} shifts", page.event.name),
        Some(&page.event.slug),
        html! {
            (section("Shifts", schedule))
            (section("Demand per team", totals("Team", &page.demand.teams)))
            (section("Demand per category", totals("Category", &page.demand.categories)))
            p { "Total demand: " (format_minutes(page.demand.total_minutes)) " hours" }
        },
    )
}
