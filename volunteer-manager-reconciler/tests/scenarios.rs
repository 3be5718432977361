use chrono::{DateTime, NaiveDate};
use volunteer_manager_reconciler::hotels::{
    self, HotelAssignment, HotelData, HotelPreference, HotelRoom,
};
use volunteer_manager_reconciler::shifts::{
    calculate_demand_minutes, resolve_shifts, Shift, ShiftCategory, ShiftData, Team,
};
use volunteer_manager_reconciler::{ApplicationStatus, GradientCache, Volunteer};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[test]
fn shifted_stay_reports_excess_and_missing_night() {
    let data = HotelData {
        rooms: vec![HotelRoom {
            id: 5,
            hotel_name: "Seaside".to_owned(),
            room_name: "Twin".to_owned(),
            visible: true,
        }],
        assignments: vec![HotelAssignment {
            id: 1,
            room_id: Some(5),
            user_id: Some(42),
            check_in: date(2),
            check_out: date(4),
        }],
        preferences: vec![HotelPreference {
            user_id: 42,
            room_id: Some(5),
            check_in: Some(date(1)),
            check_out: Some(date(3)),
            updated: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }],
        volunteers: vec![Volunteer {
            id: 42,
            name: "Mira".to_owned(),
            status: ApplicationStatus::Accepted,
        }],
    };

    let reconciliation = hotels::reconcile(&data).unwrap();
    let messages: Vec<_> = reconciliation
        .warnings
        .iter()
        .map(|warning| warning.message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Booked for nights they didn't request: 2024-01-03",
            "Requested nights that aren't booked: 2024-01-01",
        ]
    );
    assert!(reconciliation
        .warnings
        .iter()
        .all(|warning| warning.name.as_deref() == Some("Mira")));
    assert!(reconciliation.unassigned.is_empty());
    assert!(hotels::request_options(&reconciliation).is_empty());
}

#[test]
fn gradient_tiers_for_one_team() {
    let category = ShiftCategory {
        id: 1,
        name: "Bar".to_owned(),
        colour: "#000000,#ffffff".to_owned(),
    };
    let shifts = |count: i32| ShiftData {
        teams: vec![Team {
            id: 1,
            name: "Bar crew".to_owned(),
        }],
        categories: vec![category.clone()],
        shifts: (1..=count)
            .map(|id| Shift {
                id,
                team_id: 1,
                category_id: 1,
                name: format!("Bar {id}"),
                colour: None,
                demand: r#"[{"start":"18:00","end":"19:00","volunteers":2}]"#.to_owned(),
            })
            .collect(),
    };

    let mut cache = GradientCache::new();
    for count in 2..=6 {
        let resolved = resolve_shifts(&shifts(count), &mut cache).unwrap();
        let first = &resolved[0].colour;
        let last = &resolved[resolved.len() - 1].colour;
        assert_ne!(first, last, "{count} shifts");
        assert!(resolved.iter().all(|shift| shift.demand_minutes == 120));
    }
    assert_eq!(
        resolve_shifts(&shifts(2), &mut cache).unwrap()[0].colour,
        "rgb(102,102,102)"
    );
    assert_eq!(
        resolve_shifts(&shifts(4), &mut cache).unwrap()[0].colour,
        "rgb(0,0,0)"
    );
    assert_eq!(
        resolve_shifts(&shifts(1), &mut cache).unwrap()[0].colour,
        "rgb(179,179,179)"
    );
    assert_eq!(cache.len(), 1);
}

#[test]
fn demand_parsing_never_panics() {
    for input in ["", "null", "[]", "[{}]", "{\"start\":1}", "[{\"start\":\"25:00\"}]"] {
        assert_eq!(calculate_demand_minutes(input), 0, "{input}");
    }
}
