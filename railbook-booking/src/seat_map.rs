use railbook_shared::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatMapSource {
    /// Real per-wagon inventory fetched from the backend.
    Backend,
    /// Deterministic placeholder so the screen stays usable when the seat
    /// response is missing or malformed. Occupancy here does not reflect
    /// real inventory and must stay visibly distinguishable.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatMap {
    pub seats: Vec<Seat>,
    pub source: SeatMapSource,
}

impl SeatMap {
    pub fn from_backend(seats: Vec<Seat>) -> Self {
        Self {
            seats,
            source: SeatMapSource::Backend,
        }
    }

    /// Placeholder map matching the wagon's counts, with the trailing seats
    /// marked occupied first.
    pub fn synthesize(total_seats: u32, available_seats: u32) -> Self {
        let available = available_seats.min(total_seats);
        let seats = (1..=total_seats)
            .map(|number| Seat {
                number,
                occupied: number > available,
                price: None,
            })
            .collect();
        Self {
            seats,
            source: SeatMapSource::Synthesized,
        }
    }

    pub fn seat(&self, number: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.number == number)
    }

    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.occupied).count()
    }

    pub fn is_synthesized(&self) -> bool {
        self.source == SeatMapSource::Synthesized
    }
}

/// A backend seat list is usable only when it covers the wagon's full count.
pub fn covers_wagon(seats: &[Seat], wagon_total: u32) -> bool {
    seats.len() == wagon_total as usize
}
