use crate::draft::{DraftBooking, DraftError, PassengerDetails, SeatToggle};
use crate::pointer::TripPointer;
use crate::seat_map::{covers_wagon, SeatMap};
use crate::wagons::{self, WagonSource, WagonView};
use chrono::NaiveDate;
use railbook_api::{ApiError, BookingBackend, RetryPolicy};
use railbook_shared::{ClassAvailability, CreateOrderRequest, DateAvailability, Trip};
use std::sync::Arc;

/// Where one booking attempt currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingStage {
    Idle,
    LoadingAvailability,
    ClassSelected,
    LoadingWagons,
    WagonSelected,
    LoadingSeats,
    SeatsRenderable,
    Submitting,
    Succeeded { order_id: i64 },
    Failed { detail: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("no availability for {date}")]
    NoAvailability { date: NaiveDate },

    #[error("class not offered on the selected date: {0}")]
    UnknownClass(String),

    #[error("no wagon {0} in the current list")]
    UnknownWagon(u32),

    #[error("seat {0} does not exist in this wagon")]
    UnknownSeat(u32),

    #[error("seat {0} is occupied")]
    SeatOccupied(u32),

    #[error("cannot submit against approximated wagon inventory")]
    SyntheticWagon,

    #[error("invalid step {action} during {stage}")]
    InvalidStep { action: &'static str, stage: String },
}

/// Availability reconciliation for one booking attempt.
///
/// Drives `Idle → LoadingAvailability → ClassSelected → LoadingWagons →
/// WagonSelected → LoadingSeats → SeatsRenderable → Submitting →
/// {Succeeded | Failed}`. Dependent fetches are gated on their
/// prerequisite's data being present; nothing is cancelled when inputs
/// change quickly, so last-resolved-wins.
pub struct BookingFlow {
    backend: Arc<dyn BookingBackend>,
    retry: RetryPolicy,
    stage: BookingStage,
    pointer: TripPointer,
    trip: Trip,
    date: NaiveDate,
    passengers: u32,
    availability: Option<DateAvailability>,
    class: Option<String>,
    wagons: Vec<WagonView>,
    selected_wagon: Option<WagonView>,
    seat_map: Option<SeatMap>,
    draft: DraftBooking,
    warnings: Vec<String>,
}

impl BookingFlow {
    pub fn new(
        backend: Arc<dyn BookingBackend>,
        retry: RetryPolicy,
        trip: Trip,
        date: NaiveDate,
        passengers: u32,
    ) -> Self {
        let pointer = TripPointer::new(trip.id);
        Self {
            backend,
            retry,
            stage: BookingStage::Idle,
            pointer,
            trip,
            date,
            passengers,
            availability: None,
            class: None,
            wagons: Vec::new(),
            selected_wagon: None,
            seat_map: None,
            draft: DraftBooking::new(passengers as usize),
            warnings: Vec::new(),
        }
    }

    /// New date: the snapshot is stale and seat identities no longer mean
    /// anything, so the selection goes too.
    pub fn set_date(&mut self, date: NaiveDate) {
        if date == self.date {
            return;
        }
        self.date = date;
        self.draft.clear();
        self.invalidate();
    }

    /// New passenger count: snapshot stale, cap adjusted. Picks beyond the
    /// new cap fall off; captured data for the rest survives.
    pub fn set_passengers(&mut self, passengers: u32) {
        if passengers == self.passengers {
            return;
        }
        self.passengers = passengers;
        self.draft.set_cap(passengers as usize);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        // The class preference survives; its validity is re-checked on reload.
        self.availability = None;
        self.wagons.clear();
        self.selected_wagon = None;
        self.seat_map = None;
        self.stage = BookingStage::Idle;
    }

    /// Fetch the snapshot for (current trip, date, passengers), follow a
    /// repoint if the entry names another concrete trip, and settle on a
    /// class that actually exists in the new snapshot.
    pub async fn load_availability(&mut self) -> Result<(), FlowError> {
        self.stage = BookingStage::LoadingAvailability;
        self.availability = None;
        self.wagons.clear();
        self.selected_wagon = None;
        self.seat_map = None;

        let backend = self.backend.clone();
        let trip_id = self.pointer.current();
        let date = self.date;
        let passengers = self.passengers;
        let snapshot = match self
            .retry
            .run("availability fetch", || {
                backend.get_availability(trip_id, date, passengers)
            })
            .await
        {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // Captured passenger data stays; the screen shows a toast.
                self.warnings
                    .push(format!("Could not load availability: {err}"));
                self.stage = BookingStage::Idle;
                return Err(err.into());
            }
        };

        let entry = snapshot
            .dates
            .iter()
            .find(|d| d.date == date && d.is_available)
            .cloned();
        let Some(entry) = entry else {
            self.stage = BookingStage::Idle;
            return Err(FlowError::NoAvailability { date });
        };

        if entry.trip_id != self.pointer.current() {
            let from = self.pointer.current();
            self.pointer = self.pointer.follow(entry.trip_id);
            tracing::info!(from, to = entry.trip_id, "availability repointed the booking");

            // Snapshot entries carry no trip metadata, so fetch it for the
            // id everything from here on is aimed at.
            let backend = self.backend.clone();
            let new_id = entry.trip_id;
            self.trip = self
                .retry
                .run("trip fetch after repoint", || backend.get_trip(new_id))
                .await?;
        }

        let usable: Vec<&ClassAvailability> =
            entry.classes.iter().filter(|c| c.has_enough_seats).collect();
        let keep = self
            .class
            .as_ref()
            .and_then(|name| usable.iter().find(|c| &c.class_name == name));
        match keep.or_else(|| usable.first()).map(|c| c.class_name.clone()) {
            Some(name) => {
                self.class = Some(name);
                self.stage = BookingStage::ClassSelected;
            }
            None => {
                self.class = None;
                self.stage = BookingStage::Idle;
                self.warnings.push(format!(
                    "No class has {} seat(s) left on {}",
                    passengers, date
                ));
            }
        }

        self.availability = Some(entry);
        Ok(())
    }

    pub fn select_class(&mut self, name: &str) -> Result<(), FlowError> {
        let Some(entry) = self.availability.as_ref() else {
            return Err(self.invalid("select_class"));
        };
        let offered = entry
            .classes
            .iter()
            .any(|c| c.class_name == name && c.has_enough_seats);
        if !offered {
            return Err(FlowError::UnknownClass(name.to_string()));
        }
        if self.class.as_deref() != Some(name) {
            self.class = Some(name.to_string());
            self.wagons.clear();
            self.selected_wagon = None;
            self.seat_map = None;
            self.draft.clear();
        }
        self.stage = BookingStage::ClassSelected;
        Ok(())
    }

    /// Derive the wagon list for the selected class: the snapshot's
    /// embedded list first, then the wagon endpoint, then synthesized
    /// blocks as a presentation approximation.
    pub async fn load_wagons(&mut self) -> Result<(), FlowError> {
        let Some(entry) = self.availability.clone() else {
            return Err(self.invalid("load_wagons"));
        };
        let Some(class_name) = self.class.clone() else {
            return Err(self.invalid("load_wagons"));
        };
        let class = entry
            .classes
            .iter()
            .find(|c| c.class_name == class_name)
            .ok_or_else(|| FlowError::UnknownClass(class_name.clone()))?;

        self.stage = BookingStage::LoadingWagons;
        self.selected_wagon = None;
        self.seat_map = None;

        if let Some(reported) = class.wagons.as_deref().filter(|w| !w.is_empty()) {
            self.wagons = wagons::from_reported(reported);
        } else {
            let backend = self.backend.clone();
            let trip_id = self.pointer.current();
            match self
                .retry
                .run("wagon fetch", || backend.list_wagons(trip_id))
                .await
            {
                Ok(listed) => {
                    let of_class: Vec<_> = listed
                        .into_iter()
                        .filter(|w| w.wagon_type.name == class_name)
                        .collect();
                    if of_class.is_empty() {
                        self.wagons = wagons::synthesize_blocks(class);
                        self.warnings.push(
                            "Showing an approximate wagon breakdown; exact cars are assigned at the station".to_string(),
                        );
                    } else {
                        self.wagons = wagons::from_reported(&of_class);
                    }
                }
                Err(err) => {
                    self.warnings
                        .push(format!("Could not load wagons: {err}"));
                    self.wagons = wagons::synthesize_blocks(class);
                }
            }
        }

        // List ready; back to ClassSelected until the user picks a wagon.
        self.stage = BookingStage::ClassSelected;
        Ok(())
    }

    pub fn select_wagon(&mut self, number: u32) -> Result<(), FlowError> {
        let view = self
            .wagons
            .iter()
            .find(|w| w.number == number)
            .cloned()
            .ok_or(FlowError::UnknownWagon(number))?;
        if self.selected_wagon.as_ref().map(|w| w.number) != Some(number) {
            self.draft.clear();
            self.seat_map = None;
        }
        self.selected_wagon = Some(view);
        self.stage = BookingStage::WagonSelected;
        Ok(())
    }

    /// Fetch the wagon's seat list, falling back to a tagged placeholder
    /// map when the response is missing or does not cover the wagon.
    pub async fn load_seats(&mut self) -> Result<(), FlowError> {
        let Some(wagon) = self.selected_wagon.clone() else {
            return Err(self.invalid("load_seats"));
        };
        self.stage = BookingStage::LoadingSeats;

        let map = match (wagon.source, wagon.id) {
            (WagonSource::Reported, Some(id)) => {
                let backend = self.backend.clone();
                match self.retry.run("seat fetch", || backend.list_seats(id)).await {
                    Ok(seats) if covers_wagon(&seats, wagon.total_seats) => {
                        SeatMap::from_backend(seats)
                    }
                    Ok(seats) => {
                        tracing::warn!(
                            wagon = wagon.number,
                            got = seats.len(),
                            expected = wagon.total_seats,
                            "malformed seat response, synthesizing layout"
                        );
                        self.warnings.push(format!(
                            "Seat data for wagon {} was incomplete; showing an approximate layout",
                            wagon.number
                        ));
                        SeatMap::synthesize(wagon.total_seats, wagon.available_seats)
                    }
                    Err(err) => {
                        self.warnings.push(format!(
                            "Could not load seats: {err}; showing an approximate layout"
                        ));
                        SeatMap::synthesize(wagon.total_seats, wagon.available_seats)
                    }
                }
            }
            _ => {
                self.warnings.push(format!(
                    "Wagon {} is an approximation; its seat layout is too",
                    wagon.number
                ));
                SeatMap::synthesize(wagon.total_seats, wagon.available_seats)
            }
        };

        self.seat_map = Some(map);
        self.stage = BookingStage::SeatsRenderable;
        Ok(())
    }

    pub fn toggle_seat(&mut self, seat_number: u32) -> Result<SeatToggle, FlowError> {
        if !matches!(self.stage, BookingStage::SeatsRenderable) {
            return Err(self.invalid("toggle_seat"));
        }
        let Some(map) = self.seat_map.as_ref() else {
            return Err(self.invalid("toggle_seat"));
        };
        let seat = map
            .seat(seat_number)
            .ok_or(FlowError::UnknownSeat(seat_number))?;
        let occupied = seat.occupied;
        let price = seat.price;

        let already_selected = self.draft.passenger_for(seat_number).is_some()
            || self.draft.selected_seats().contains(&seat_number);
        if occupied && !already_selected {
            return Err(FlowError::SeatOccupied(seat_number));
        }

        let outcome = self.draft.toggle_seat(seat_number, price);
        if outcome == SeatToggle::RejectedCapReached {
            self.warnings.push(format!(
                "This booking is for {} passenger(s); deselect a seat first",
                self.draft.cap()
            ));
        }
        Ok(outcome)
    }

    pub fn bind_passenger(
        &mut self,
        seat_number: u32,
        details: PassengerDetails,
    ) -> Result<(), FlowError> {
        self.draft.bind_passenger(seat_number, details)?;
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        matches!(
            self.stage,
            BookingStage::SeatsRenderable | BookingStage::Failed { .. }
        ) && self.draft.can_submit()
    }

    /// Post the assembled order. Success destroys the draft; failure keeps
    /// it intact so the user can resubmit.
    pub async fn submit(&mut self) -> Result<i64, FlowError> {
        if !matches!(
            self.stage,
            BookingStage::SeatsRenderable | BookingStage::Failed { .. }
        ) {
            return Err(self.invalid("submit"));
        }
        let Some(wagon) = self.selected_wagon.clone() else {
            return Err(self.invalid("submit"));
        };
        let wagon_id = wagon.id.ok_or(FlowError::SyntheticWagon)?;

        let fallback = self.fallback_price();
        let tickets = self
            .draft
            .build_tickets(self.pointer.current(), wagon_id, fallback)?;
        let request = CreateOrderRequest { tickets };

        self.stage = BookingStage::Submitting;
        match self.backend.create_order(&request).await {
            Ok(order) => {
                self.draft.clear();
                self.stage = BookingStage::Succeeded { order_id: order.id };
                Ok(order.id)
            }
            Err(err) => {
                let detail = err.to_string();
                tracing::warn!("order submission failed: {detail}");
                self.stage = BookingStage::Failed { detail };
                Err(err.into())
            }
        }
    }

    /// Per-ticket price where the seat carries no override: the class's
    /// live per-passenger figure when the backend sent one, else the
    /// trip-level base price.
    fn fallback_price(&self) -> i64 {
        let class_total = self.availability.as_ref().and_then(|entry| {
            let name = self.class.as_deref()?;
            entry
                .classes
                .iter()
                .find(|c| c.class_name == name)?
                .price_for_passengers
        });
        match class_total {
            Some(total) if self.passengers > 0 => total / i64::from(self.passengers),
            _ => self.trip.base_price,
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidStep {
            action,
            stage: format!("{:?}", self.stage),
        }
    }

    // Read accessors for the rendering layer.

    pub fn stage(&self) -> &BookingStage {
        &self.stage
    }

    pub fn pointer(&self) -> TripPointer {
        self.pointer
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn available_classes(&self) -> Vec<&str> {
        self.availability
            .as_ref()
            .map(|entry| {
                entry
                    .classes
                    .iter()
                    .filter(|c| c.has_enough_seats)
                    .map(|c| c.class_name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn wagons(&self) -> &[WagonView] {
        &self.wagons
    }

    pub fn selected_wagon(&self) -> Option<&WagonView> {
        self.selected_wagon.as_ref()
    }

    pub fn seat_map(&self) -> Option<&SeatMap> {
        self.seat_map.as_ref()
    }

    pub fn draft(&self) -> &DraftBooking {
        &self.draft
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
