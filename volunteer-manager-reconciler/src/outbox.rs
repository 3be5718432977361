use core::fmt::{self, Display};
use core::str::FromStr;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ReconcileError, UnknownValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    WhatsApp,
}

impl FromStr for Channel {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "whatsapp" => Ok(Self::WhatsApp),
            other => Err(UnknownValue::new("message channel", other)),
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Email => "E-mail",
            Self::Sms => "SMS",
            Self::WhatsApp => "WhatsApp",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Queued,
    Sent,
    Delivered,
    Failed,
}

impl FromStr for DeliveryStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "queued" => Ok(Self::Queued),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownValue::new("delivery status", other)),
        }
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Queued => "queued",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        })
    }
}

/// One row of the outbound message log, channel and status as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxMessage {
    pub id: i32,
    pub channel: String,
    pub status: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboxCount {
    pub channel: Channel,
    pub status: DeliveryStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboxSummary {
    pub counts: Vec<OutboxCount>,
    pub total: usize,
    pub failed: usize,
    pub latest: Option<DateTime<Utc>>,
}

pub fn summarise(messages: &[OutboxMessage]) -> Result<OutboxSummary, ReconcileError> {
    let mut counts: BTreeMap<(Channel, DeliveryStatus), usize> = BTreeMap::new();
    for message in messages {
        let channel: Channel = message.channel.parse()?;
        let status: DeliveryStatus = message.status.parse()?;
        *counts.entry((channel, status)).or_default() += 1;
    }
    let failed = counts
        .iter()
        .filter(|((_, status), _)| *status == DeliveryStatus::Failed)
        .map(|(_, count)| count)
        .sum();
    Ok(OutboxSummary {
        counts: counts
            .into_iter()
            .map(|((channel, status), count)| OutboxCount {
                channel,
                status,
                count,
            })
            .collect(),
        total: messages.len(),
        failed,
        latest: messages.iter().map(|message| message.created).max(),
    })
}
