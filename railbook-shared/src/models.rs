use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A place trains depart from or arrive at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub id: i64,
    pub number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub origin: Station,
    pub destination: Station,
    pub distance_km: i64,
}

/// One scheduled departure of a train over a route.
///
/// Fetched per search/detail view and never mutated client-side; admin
/// screens replace the whole record via PUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub train: Train,
    pub route: Route,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    /// Base fare in minor currency units, before class multipliers.
    pub base_price: i64,
    pub duration_minutes: i64,
    /// Fare classes offered on this trip, as reported by search responses.
    #[serde(default)]
    pub classes: Vec<String>,
}

/// Named service tier with a price multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonType {
    pub id: i64,
    pub name: String,
    pub fare_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonAmenity {
    pub id: i64,
    pub name: String,
}

/// A physical car of a given class attached to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wagon {
    pub id: i64,
    pub trip_id: i64,
    pub wagon_type: WagonType,
    pub number: u32,
    pub total_seats: u32,
    pub available_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub number: u32,
    pub occupied: bool,
    /// Per-seat price override; the trip-level price applies when absent.
    pub price: Option<i64>,
}

/// Discount category applied per passenger when pricing a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerType {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub discount_percent: f64,
    pub requires_document: bool,
}

/// Server response describing seat/class availability for a trip across a
/// small window of dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    pub trip_id: i64,
    #[serde(rename = "dates_availability")]
    pub dates: Vec<DateAvailability>,
}

/// One calendar date within a snapshot. The `trip_id` here is the concrete
/// trip serving this date and may differ from the snapshot's starting trip
/// when the service is recurring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAvailability {
    pub date: NaiveDate,
    pub trip_id: i64,
    pub is_available: bool,
    pub classes: Vec<ClassAvailability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAvailability {
    pub class_name: String,
    pub available_seats: u32,
    pub total_seats: u32,
    pub has_enough_seats: bool,
    /// Live total for the requested passenger count, when the backend
    /// computed one. Absent means: scale `base_price` by the class multiplier.
    pub price_for_passengers: Option<i64>,
    /// Explicit per-class wagon list. Absent on recurring services where the
    /// backend only tracks aggregate counts.
    pub wagons: Option<Vec<Wagon>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserProfile {
    pub fn is_privileged(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A purchased ticket: one seat on one wagon of one trip, for one passenger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub trip_id: i64,
    pub wagon_id: i64,
    pub seat_number: u32,
    pub passenger_name: String,
    pub passenger_document: Option<String>,
    pub passenger_type_id: i64,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub tickets: Vec<Ticket>,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

/// One ticket line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub trip_id: i64,
    pub wagon_id: i64,
    pub seat_number: u32,
    pub passenger_name: String,
    pub passenger_document: Option<String>,
    pub passenger_type_id: i64,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub tickets: Vec<TicketRequest>,
}

impl CreateOrderRequest {
    pub fn total_price(&self) -> i64 {
        self.tickets.iter().map(|t| t.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_snapshot_deserialization() {
        let json = r#"
            {
                "trip_id": 1,
                "dates_availability": [
                    {
                        "date": "2026-09-01",
                        "trip_id": 7,
                        "is_available": true,
                        "classes": [
                            {
                                "class_name": "Normal",
                                "available_seats": 20,
                                "total_seats": 24,
                                "has_enough_seats": true,
                                "price_for_passengers": 4500,
                                "wagons": null
                            }
                        ]
                    }
                ]
            }
        "#;
        let snapshot: AvailabilitySnapshot =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(snapshot.trip_id, 1);
        assert_eq!(snapshot.dates[0].trip_id, 7);
        assert_eq!(snapshot.dates[0].classes[0].class_name, "Normal");
        assert!(snapshot.dates[0].classes[0].wagons.is_none());
    }

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }

    #[test]
    fn test_order_request_total() {
        let req = CreateOrderRequest {
            tickets: vec![
                TicketRequest {
                    trip_id: 1,
                    wagon_id: 2,
                    seat_number: 5,
                    passenger_name: "Ada Lovelace".to_string(),
                    passenger_document: None,
                    passenger_type_id: 1,
                    price: 4500,
                },
                TicketRequest {
                    trip_id: 1,
                    wagon_id: 2,
                    seat_number: 6,
                    passenger_name: "Alan Turing".to_string(),
                    passenger_document: Some("AB123456".to_string()),
                    passenger_type_id: 2,
                    price: 2250,
                },
            ],
        };
        assert_eq!(req.total_price(), 6750);
    }
}
