use railbook_shared::TicketRequest;
use uuid::Uuid;

/// What the passenger-detail form captures for one seat.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerDetails {
    pub name: String,
    pub document: Option<String>,
    pub passenger_type_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
struct SeatPick {
    seat_number: u32,
    /// Per-seat price override carried from the seat map.
    price: Option<i64>,
    passenger: Option<PassengerDetails>,
}

/// Outcome of clicking a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatToggle {
    Added,
    Removed,
    /// Selection already holds one seat per passenger; nothing changed.
    RejectedCapReached,
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("seat {0} is not part of the selection")]
    UnknownSeat(u32),

    #[error("draft incomplete: {captured} of {selected} passengers captured")]
    Incomplete { selected: usize, captured: usize },

    #[error("nothing selected")]
    Empty,
}

/// The transient, client-local selection of seats and passenger details.
/// Exists from the first seat click until submission or cancellation and
/// never outlives its screen.
#[derive(Debug, Clone)]
pub struct DraftBooking {
    pub id: Uuid,
    cap: usize,
    picks: Vec<SeatPick>,
}

impl DraftBooking {
    pub fn new(cap: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            cap,
            picks: Vec::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Lower the cap (passenger count edited mid-flow): excess picks fall
    /// off the end, each taking its captured passenger data with it.
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.picks.truncate(cap);
    }

    pub fn toggle_seat(&mut self, seat_number: u32, price: Option<i64>) -> SeatToggle {
        if let Some(index) = self.picks.iter().position(|p| p.seat_number == seat_number) {
            // Seat and its captured passenger data go together, atomically.
            self.picks.remove(index);
            return SeatToggle::Removed;
        }
        if self.picks.len() >= self.cap {
            return SeatToggle::RejectedCapReached;
        }
        self.picks.push(SeatPick {
            seat_number,
            price,
            passenger: None,
        });
        SeatToggle::Added
    }

    pub fn bind_passenger(
        &mut self,
        seat_number: u32,
        details: PassengerDetails,
    ) -> Result<(), DraftError> {
        let pick = self
            .picks
            .iter_mut()
            .find(|p| p.seat_number == seat_number)
            .ok_or(DraftError::UnknownSeat(seat_number))?;
        pick.passenger = Some(details);
        Ok(())
    }

    pub fn selected_seats(&self) -> Vec<u32> {
        self.picks.iter().map(|p| p.seat_number).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.picks.len()
    }

    pub fn captured_count(&self) -> usize {
        self.picks.iter().filter(|p| p.passenger.is_some()).count()
    }

    pub fn passenger_for(&self, seat_number: u32) -> Option<&PassengerDetails> {
        self.picks
            .iter()
            .find(|p| p.seat_number == seat_number)
            .and_then(|p| p.passenger.as_ref())
    }

    /// Submission is enabled exactly when every selected seat has captured
    /// passenger data and the selection is non-empty.
    pub fn can_submit(&self) -> bool {
        !self.picks.is_empty() && self.captured_count() == self.picks.len()
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    /// One ticket per selected seat, in selection order. `fallback_price`
    /// applies where the seat carries no override.
    pub fn build_tickets(
        &self,
        trip_id: i64,
        wagon_id: i64,
        fallback_price: i64,
    ) -> Result<Vec<TicketRequest>, DraftError> {
        if self.picks.is_empty() {
            return Err(DraftError::Empty);
        }
        let mut tickets = Vec::with_capacity(self.picks.len());
        for pick in &self.picks {
            let passenger = pick.passenger.as_ref().ok_or(DraftError::Incomplete {
                selected: self.selected_count(),
                captured: self.captured_count(),
            })?;
            tickets.push(TicketRequest {
                trip_id,
                wagon_id,
                seat_number: pick.seat_number,
                passenger_name: passenger.name.clone(),
                passenger_document: passenger.document.clone(),
                passenger_type_id: passenger.passenger_type_id,
                price: pick.price.unwrap_or(fallback_price),
            });
        }
        Ok(tickets)
    }
}
