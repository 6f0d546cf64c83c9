use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use railbook_api::{ApiError, ApiResult, BookingBackend, RetryPolicy};
use railbook_booking::{
    BookingFlow, BookingStage, FlowError, PassengerDetails, SeatMapSource, SeatToggle, TripPointer,
    WagonSource,
};
use railbook_shared::{
    AvailabilitySnapshot, ClassAvailability, CreateOrderRequest, DateAvailability, Order,
    OrderStatus, PassengerType, Route, Seat, Station, Ticket, Train, Trip, Wagon, WagonType,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn station(id: i64, name: &str) -> Station {
    Station {
        id,
        name: name.to_string(),
        code: name[..3].to_uppercase(),
        city: name.to_string(),
    }
}

fn trip(id: i64) -> Trip {
    Trip {
        id,
        train: Train {
            id: 1,
            number: "IC 204".to_string(),
            name: "Coastal Express".to_string(),
        },
        route: Route {
            id: 1,
            origin: station(1, "Harborview"),
            destination: station(2, "Summitfield"),
            distance_km: 412,
        },
        departure: Utc.with_ymd_and_hms(2026, 9, 1, 8, 30, 0).unwrap(),
        arrival: Utc.with_ymd_and_hms(2026, 9, 1, 13, 15, 0).unwrap(),
        base_price: 4500,
        duration_minutes: 285,
        classes: vec!["Normal".to_string(), "Lux".to_string()],
    }
}

fn class(name: &str, available: u32, total: u32, wagons: Option<Vec<Wagon>>) -> ClassAvailability {
    ClassAvailability {
        class_name: name.to_string(),
        available_seats: available,
        total_seats: total,
        has_enough_seats: available > 0,
        price_for_passengers: Some(9000),
        wagons,
    }
}

fn wagon(id: i64, trip_id: i64, number: u32, class_name: &str) -> Wagon {
    Wagon {
        id,
        trip_id,
        wagon_type: WagonType {
            id: 1,
            name: class_name.to_string(),
            fare_multiplier: 1.0,
        },
        number,
        total_seats: 4,
        available_seats: 3,
    }
}

fn seats(total: u32, occupied_from: u32) -> Vec<Seat> {
    (1..=total)
        .map(|number| Seat {
            number,
            occupied: number >= occupied_from,
            price: None,
        })
        .collect()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

#[derive(Default)]
struct ScriptedBackend {
    trips: HashMap<i64, Trip>,
    snapshots: Mutex<HashMap<NaiveDate, AvailabilitySnapshot>>,
    wagons: HashMap<i64, Vec<Wagon>>,
    seats: HashMap<i64, Vec<Seat>>,
    fail_orders: AtomicBool,
    submitted: Mutex<Vec<CreateOrderRequest>>,
}

impl ScriptedBackend {
    fn snapshot_for(&self, date: NaiveDate, trip_id: i64, classes: Vec<ClassAvailability>) {
        self.snapshots.lock().unwrap().insert(
            date,
            AvailabilitySnapshot {
                trip_id,
                dates: vec![DateAvailability {
                    date,
                    trip_id,
                    is_available: true,
                    classes,
                }],
            },
        );
    }
}

#[async_trait]
impl BookingBackend for ScriptedBackend {
    async fn get_trip(&self, trip_id: i64) -> ApiResult<Trip> {
        self.trips.get(&trip_id).cloned().ok_or(ApiError::Status {
            status: 404,
            detail: format!("trip {trip_id} not found"),
        })
    }

    async fn get_availability(
        &self,
        _trip_id: i64,
        date: NaiveDate,
        _passengers: u32,
    ) -> ApiResult<AvailabilitySnapshot> {
        self.snapshots
            .lock()
            .unwrap()
            .get(&date)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                detail: "no availability".to_string(),
            })
    }

    async fn list_wagons(&self, trip_id: i64) -> ApiResult<Vec<Wagon>> {
        Ok(self.wagons.get(&trip_id).cloned().unwrap_or_default())
    }

    async fn list_seats(&self, wagon_id: i64) -> ApiResult<Vec<Seat>> {
        self.seats.get(&wagon_id).cloned().ok_or(ApiError::Status {
            status: 404,
            detail: "no seats".to_string(),
        })
    }

    async fn search_trips(
        &self,
        _origin_id: i64,
        _destination_id: i64,
        _date: NaiveDate,
    ) -> ApiResult<Vec<Trip>> {
        Ok(Vec::new())
    }

    async fn list_passenger_types(&self) -> ApiResult<Vec<PassengerType>> {
        Ok(Vec::new())
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> ApiResult<Order> {
        if self.fail_orders.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 409,
                detail: "Seat 2 was just taken".to_string(),
            });
        }
        self.submitted.lock().unwrap().push(req.clone());
        Ok(Order {
            id: 501,
            status: OrderStatus::Pending,
            tickets: req
                .tickets
                .iter()
                .enumerate()
                .map(|(i, t)| Ticket {
                    id: i as i64 + 1,
                    trip_id: t.trip_id,
                    wagon_id: t.wagon_id,
                    seat_number: t.seat_number,
                    passenger_name: t.passenger_name.clone(),
                    passenger_document: t.passenger_document.clone(),
                    passenger_type_id: t.passenger_type_id,
                    price: t.price,
                })
                .collect(),
            total_price: req.total_price(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap(),
        })
    }
}

fn passenger(name: &str) -> PassengerDetails {
    PassengerDetails {
        name: name.to_string(),
        document: Some("AB123456".to_string()),
        passenger_type_id: 1,
    }
}

fn flow_with(backend: Arc<ScriptedBackend>, passengers: u32) -> BookingFlow {
    BookingFlow::new(
        backend,
        RetryPolicy::single_attempt(),
        trip(1),
        date(),
        passengers,
    )
}

#[tokio::test]
async fn test_snapshot_repoints_booking_at_concrete_trip() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    backend.trips.insert(7, trip(7));
    let backend = Arc::new(backend);
    backend.snapshot_for(date(), 7, vec![class("Normal", 20, 24, None)]);

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();

    assert_eq!(flow.pointer(), TripPointer::Repointed { from: 1, to: 7 });
    assert_eq!(flow.trip().id, 7);
    assert_eq!(*flow.stage(), BookingStage::ClassSelected);
}

#[tokio::test]
async fn test_missing_class_falls_back_to_first_available() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class("Normal", 10, 24, None), class("Lux", 4, 8, None)],
    );

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.select_class("Lux").unwrap();

    // The next date has no Lux seats left.
    let next = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();
    backend.snapshot_for(next, 1, vec![class("Normal", 10, 24, None)]);
    flow.set_date(next);
    flow.load_availability().await.unwrap();

    assert_eq!(flow.selected_class(), Some("Normal"));
    assert_eq!(flow.available_classes(), vec!["Normal"]);
}

#[tokio::test]
async fn test_reported_wagons_yield_backend_seat_map() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    backend.seats.insert(11, seats(4, 4));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class(
            "Normal",
            3,
            4,
            Some(vec![wagon(11, 1, 1, "Normal")]),
        )],
    );

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();

    assert_eq!(flow.wagons().len(), 1);
    assert_eq!(flow.wagons()[0].source, WagonSource::Reported);

    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();

    let map = flow.seat_map().unwrap();
    assert_eq!(map.source, SeatMapSource::Backend);
    assert_eq!(map.available_count(), 3);
    assert!(flow.take_warnings().is_empty());
}

#[tokio::test]
async fn test_missing_wagon_data_synthesizes_blocks_and_seats() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    let backend = Arc::new(backend);
    backend.snapshot_for(date(), 1, vec![class("Normal", 20, 24, None)]);

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();

    // 24 seats split into a full block and a 4-seat remainder.
    assert_eq!(flow.wagons().len(), 2);
    assert!(flow
        .wagons()
        .iter()
        .all(|w| w.source == WagonSource::Synthesized));
    assert_eq!(
        flow.wagons().iter().map(|w| w.available_seats).sum::<u32>(),
        20
    );

    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();
    assert!(flow.seat_map().unwrap().is_synthesized());
    assert!(!flow.take_warnings().is_empty());
}

#[tokio::test]
async fn test_short_seat_response_falls_back_to_placeholder_map() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    // Only 2 of the wagon's 4 seats come back.
    backend.seats.insert(11, seats(2, 3));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class(
            "Normal",
            3,
            4,
            Some(vec![wagon(11, 1, 1, "Normal")]),
        )],
    );

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();
    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();

    let map = flow.seat_map().unwrap();
    assert!(map.is_synthesized());
    assert_eq!(map.seats.len(), 4);
}

#[tokio::test]
async fn test_submission_sends_tickets_in_selection_order() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    backend.seats.insert(11, seats(4, 4));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class(
            "Normal",
            3,
            4,
            Some(vec![wagon(11, 1, 1, "Normal")]),
        )],
    );

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();
    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();

    assert_eq!(flow.toggle_seat(3).unwrap(), SeatToggle::Added);
    assert_eq!(flow.toggle_seat(1).unwrap(), SeatToggle::Added);
    flow.bind_passenger(3, passenger("Ada")).unwrap();
    flow.bind_passenger(1, passenger("Alan")).unwrap();
    assert!(flow.can_submit());

    let order_id = flow.submit().await.unwrap();
    assert_eq!(order_id, 501);
    assert_eq!(*flow.stage(), BookingStage::Succeeded { order_id: 501 });
    assert_eq!(flow.draft().selected_count(), 0);

    let submitted = backend.submitted.lock().unwrap();
    let tickets = &submitted[0].tickets;
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].seat_number, 3);
    assert_eq!(tickets[0].passenger_name, "Ada");
    assert_eq!(tickets[1].seat_number, 1);
    assert_eq!(tickets[1].passenger_name, "Alan");
    assert!(tickets.iter().all(|t| t.wagon_id == 11 && t.trip_id == 1));
}

#[tokio::test]
async fn test_failed_submission_keeps_draft_for_resubmission() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    backend.seats.insert(11, seats(4, 4));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class(
            "Normal",
            3,
            4,
            Some(vec![wagon(11, 1, 1, "Normal")]),
        )],
    );

    let mut flow = flow_with(backend.clone(), 1);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();
    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();
    flow.toggle_seat(2).unwrap();
    flow.bind_passenger(2, passenger("Ada")).unwrap();

    backend.fail_orders.store(true, Ordering::SeqCst);
    let err = flow.submit().await.unwrap_err();
    assert!(matches!(err, FlowError::Api(_)));
    assert!(matches!(flow.stage(), BookingStage::Failed { detail } if detail.contains("taken")));
    assert_eq!(flow.draft().selected_seats(), vec![2]);
    assert!(flow.can_submit());

    backend.fail_orders.store(false, Ordering::SeqCst);
    let order_id = flow.submit().await.unwrap();
    assert_eq!(order_id, 501);
}

#[tokio::test]
async fn test_synthesized_wagon_refuses_submission() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    let backend = Arc::new(backend);
    backend.snapshot_for(date(), 1, vec![class("Normal", 20, 24, None)]);

    let mut flow = flow_with(backend.clone(), 1);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();
    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();
    flow.toggle_seat(1).unwrap();
    flow.bind_passenger(1, passenger("Ada")).unwrap();

    assert!(matches!(
        flow.submit().await.unwrap_err(),
        FlowError::SyntheticWagon
    ));
    assert!(backend.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_occupied_seat_cannot_be_selected() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    backend.seats.insert(11, seats(4, 3));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class(
            "Normal",
            2,
            4,
            Some(vec![wagon(11, 1, 1, "Normal")]),
        )],
    );

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();
    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();

    assert!(matches!(
        flow.toggle_seat(4).unwrap_err(),
        FlowError::SeatOccupied(4)
    ));
    assert!(matches!(
        flow.toggle_seat(9).unwrap_err(),
        FlowError::UnknownSeat(9)
    ));
}

#[tokio::test]
async fn test_availability_failure_preserves_captured_passengers() {
    let mut backend = ScriptedBackend::default();
    backend.trips.insert(1, trip(1));
    backend.seats.insert(11, seats(4, 4));
    let backend = Arc::new(backend);
    backend.snapshot_for(
        date(),
        1,
        vec![class(
            "Normal",
            3,
            4,
            Some(vec![wagon(11, 1, 1, "Normal")]),
        )],
    );

    let mut flow = flow_with(backend.clone(), 2);
    flow.load_availability().await.unwrap();
    flow.load_wagons().await.unwrap();
    flow.select_wagon(1).unwrap();
    flow.load_seats().await.unwrap();
    flow.toggle_seat(2).unwrap();
    flow.bind_passenger(2, passenger("Ada")).unwrap();

    // A transient failure on refresh must not wipe what the user typed.
    backend.snapshots.lock().unwrap().clear();
    assert!(flow.load_availability().await.is_err());

    assert_eq!(flow.draft().selected_seats(), vec![2]);
    assert_eq!(flow.draft().passenger_for(2).unwrap().name, "Ada");
    assert!(!flow.take_warnings().is_empty());
}
