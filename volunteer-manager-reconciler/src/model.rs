use core::cmp::Ordering;
use core::str::FromStr;
use std::collections::HashMap;

use feruca::Collator;
use serde::Serialize;

use crate::error::UnknownValue;

pub type UserId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Registered,
    Accepted,
    Rejected,
    Cancelled,
}

impl FromStr for ApplicationStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registered" => Ok(Self::Registered),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownValue::new("application status", other)),
        }
    }
}

/// A user who applied to help at the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volunteer {
    pub id: UserId,
    pub name: String,
    pub status: ApplicationStatus,
}

impl Volunteer {
    #[must_use]
    pub fn is_participating(&self) -> bool {
        self.status == ApplicationStatus::Accepted
    }
}

/// Something a human should look at. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// `None` when the warning is about a booking that isn't linked to a user.
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: i32,
    pub label: String,
}

/// Orders names with the Unicode Collation Algorithm (CLDR root order), so
/// "Émile" sorts next to "Emil" instead of after "Zoe". Falls back to the exact
/// spelling so the result is total.
pub fn compare_names(collator: &mut Collator, left: &str, right: &str) -> Ordering {
    collator
        .collate(left, right)
        .then_with(|| left.cmp(right))
}

/// Stable sort by name.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    let mut collator = Collator::default();
    items.sort_by(|left, right| compare_names(&mut collator, name(left), name(right)));
}

/// Warnings without a name come first.
pub(crate) fn sort_warnings(warnings: &mut [Warning]) {
    let mut collator = Collator::default();
    warnings.sort_by(|left, right| match (&left.name, &right.name) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => compare_names(&mut collator, left, right),
    });
}

pub(crate) struct Roster<'a> {
    volunteers: HashMap<UserId, &'a Volunteer>,
}

impl<'a> Roster<'a> {
    pub(crate) fn new(volunteers: &'a [Volunteer]) -> Self {
        Self {
            volunteers: volunteers
                .iter()
                .map(|volunteer| (volunteer.id, volunteer))
                .collect(),
        }
    }

    pub(crate) fn name(&self, user_id: UserId) -> String {
        self.volunteers.get(&user_id).map_or_else(
            || format!("Unknown user #{user_id}"),
            |volunteer| volunteer.name.clone(),
        )
    }

    pub(crate) fn is_participating(&self, user_id: UserId) -> bool {
        self.volunteers
            .get(&user_id)
            .is_some_and(|volunteer| volunteer.is_participating())
    }

    pub(crate) fn warning(&self, user_id: UserId, message: String) -> Warning {
        Warning {
            user_id: Some(user_id),
            name: Some(self.name(user_id)),
            message,
        }
    }
}
