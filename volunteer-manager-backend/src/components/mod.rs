pub mod main;

use maud::{html, Markup, Render};
use volunteer_manager_reconciler::{SelectOption, Warning};

/// Renders a table, or a single "Nothing to show" row when there are no rows.
pub fn table<R, C>(headers: &[&str], rows: R) -> Markup
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Render,
{
    let rows: Vec<C> = rows.into_iter().collect();
    html! {
        table {
            tr {
                @for header in headers {
                    th { (header) }
                }
            }
            @if rows.is_empty() {
                tr {
                    td colspan=(headers.len()) { "Nothing to show" }
                }
            } @else {
                @for row in rows {
                    tr {
                        @for cell in row {
                            td { (cell) }
                        }
                    }
                }
            }
        }
    }
}

pub fn section(title: &str, body: Markup) -> Markup {
    html! {
        h2 { (title) }
        (body)
    }
}

pub fn select(name: &str, options: &[SelectOption]) -> Markup {
    html! {
        select name=(name) {
            @for choice in options {
                option value=(choice.value) { (choice.label) }
            }
        }
    }
}

pub fn warnings(warnings: &[Warning]) -> Markup {
    table(
        &["Volunteer", "Warning"],
        warnings.iter().map(|warning| {
            [
                warning.name.as_deref().unwrap_or_default(),
                warning.message.as_str(),
            ]
        }),
    )
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
