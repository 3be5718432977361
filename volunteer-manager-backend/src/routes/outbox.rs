use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use maud::{html, Markup};
use serde::Serialize;
use volunteer_manager_database::loaders::load_outbox_messages;
use volunteer_manager_database::models::EventRow;
use volunteer_manager_database::AsyncPgConnection;
use volunteer_manager_reconciler::outbox::{summarise, OutboxSummary};

use crate::components::main::main;
use crate::components::{section, table};
use crate::error::AppError;
use crate::routes::{respond, Format};
use crate::tables::EventSummary;

#[derive(Debug, Serialize)]
pub struct OutboxPage {
    pub event: EventSummary,
    #[serde(flatten)]
    pub summary: OutboxSummary,
}

pub async fn outbox(
    connection: &mut AsyncPgConnection,
    event: &EventRow,
    format: Format,
) -> Result<Response<Full<Bytes>>, AppError> {
    let messages = load_outbox_messages(connection, event.event_id).await?;
    let page = OutboxPage {
        event: event.into(),
        summary: summarise(&messages)?,
    };
    respond(format, &page, render)
}

pub fn render(page: &OutboxPage) -> Markup {
    let counts = table(
        &["Channel", "Status", "Messages"],
        page.summary.counts.iter().map(|count| {
            [
                count.channel.to_string(),
                count.status.to_string(),
                count.count.to_string(),
            ]
        }),
    );
    main(
        &format!("{} outbox", page.event.name),
        Some(&page.event.slug),
        html! {
            (section("Messages", counts))
            p { (page.summary.total) " messages in total, " (page.summary.failed) " failed." }
            @if let Some(latest) = page.summary.latest {
                p { "Most recent message: " (latest.format("%Y-%m-%d %H:%M").to_string()) }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};
    use volunteer_manager_reconciler::outbox::OutboxMessage;

    use super::*;

    fn page(messages: &[OutboxMessage]) -> OutboxPage {
        OutboxPage {
            event: EventSummary {
                slug: "summer".to_owned(),
                name: "Summer".to_owned(),
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
            },
            summary: summarise(messages).unwrap(),
        }
    }

    fn message(id: i32, channel: &str, status: &str) -> OutboxMessage {
        OutboxMessage {
            id,
            channel: channel.to_owned(),
            status: status.to_owned(),
            created: DateTime::from_timestamp(1_720_000_000 + i64::from(id) * 60, 0).unwrap(),
        }
    }

    #[test]
    fn renders_counts() {
        let html = render(&page(&[
            message(1, "email", "delivered"),
            message(2, "email", "delivered"),
            message(3, "sms", "failed"),
        ]))
        .into_string();
        assert!(html.contains("<td>E-mail</td><td>delivered</td><td>2</td>"));
        assert!(html.contains("<td>SMS</td><td>failed</td><td>1</td>"));
        assert!(html.contains("3 messages in total, 1 failed."));
        assert!(html.contains("Most recent message: 2024-07-03 09:49"));
    }

    #[test]
    fn empty_outbox() {
        let html = render(&page(&[])).into_string();
        assert!(html.contains("0 messages in total, 0 failed."));
        assert!(!html.contains("Most recent message"));
    }
}
