use chrono::Timelike;
use railbook_shared::Trip;

/// Client-side result filter. All predicates are conjunctive; hour windows
/// are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    /// Departure wall-clock hour window, e.g. (6, 11).
    pub departure_hours: Option<(u32, u32)>,
    /// Arrival wall-clock hour window.
    pub arrival_hours: Option<(u32, u32)>,
    /// Keep only trips offering this fare class.
    pub class_name: Option<String>,
}

impl TripFilter {
    pub fn is_empty(&self) -> bool {
        self.departure_hours.is_none() && self.arrival_hours.is_none() && self.class_name.is_none()
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some((from, to)) = self.departure_hours {
            let hour = trip.departure.hour();
            if hour < from || hour > to {
                return false;
            }
        }
        if let Some((from, to)) = self.arrival_hours {
            let hour = trip.arrival.hour();
            if hour < from || hour > to {
                return false;
            }
        }
        if let Some(class_name) = &self.class_name {
            if !trip.classes.iter().any(|c| c == class_name) {
                return false;
            }
        }
        true
    }
}

/// Pure: the same filter applied twice yields the same list as applied once.
pub fn filter_trips(trips: &[Trip], filter: &TripFilter) -> Vec<Trip> {
    trips
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use railbook_shared::{Route, Station, Train};

    fn station(id: i64, code: &str) -> Station {
        Station {
            id,
            name: format!("{code} Central"),
            code: code.to_string(),
            city: code.to_string(),
        }
    }

    fn trip(id: i64, dep_hour: u32, arr_hour: u32, classes: &[&str]) -> Trip {
        let departure = Utc.with_ymd_and_hms(2026, 9, 1, dep_hour, 0, 0).unwrap();
        let arrival = Utc.with_ymd_and_hms(2026, 9, 1, arr_hour, 30, 0).unwrap();
        Trip {
            id,
            train: Train {
                id: 1,
                number: "IC 204".to_string(),
                name: "Coastal".to_string(),
            },
            route: Route {
                id: 1,
                origin: station(1, "AAA"),
                destination: station(2, "BBB"),
                distance_km: 300,
            },
            departure,
            arrival,
            base_price: 4500,
            duration_minutes: (arrival - departure).num_minutes(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn fixture() -> Vec<Trip> {
        vec![
            trip(1, 6, 9, &["Normal", "Lux"]),
            trip(2, 12, 16, &["Normal"]),
            trip(3, 22, 23, &["Lux"]),
        ]
    }

    #[test]
    fn test_departure_window_is_inclusive() {
        let filter = TripFilter {
            departure_hours: Some((6, 12)),
            ..Default::default()
        };
        let kept = filter_trips(&fixture(), &filter);
        assert_eq!(kept.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_class_presence_filter() {
        let filter = TripFilter {
            class_name: Some("Lux".to_string()),
            ..Default::default()
        };
        let kept = filter_trips(&fixture(), &filter);
        assert_eq!(kept.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = TripFilter {
            departure_hours: Some((0, 12)),
            arrival_hours: Some((8, 18)),
            class_name: Some("Normal".to_string()),
        };
        let once = filter_trips(&fixture(), &filter);
        let twice = filter_trips(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = TripFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter_trips(&fixture(), &filter).len(), 3);
    }
}
