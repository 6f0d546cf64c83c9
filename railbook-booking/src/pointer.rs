/// Which concrete trip the booking attempt is aimed at.
///
/// On recurring services the availability snapshot can name a different
/// underlying trip for the selected date than the one the flow started
/// from. That reassignment is a visible, tagged transition rather than a
/// silently mutated id, so tests can assert it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripPointer {
    Resolved { trip_id: i64 },
    Repointed { from: i64, to: i64 },
}

impl TripPointer {
    pub fn new(trip_id: i64) -> Self {
        TripPointer::Resolved { trip_id }
    }

    /// The id every subsequent request (wagons, seats, submission) uses.
    pub fn current(&self) -> i64 {
        match self {
            TripPointer::Resolved { trip_id } => *trip_id,
            TripPointer::Repointed { to, .. } => *to,
        }
    }

    /// Follow the trip id the snapshot resolved for the selected date.
    pub fn follow(self, resolved: i64) -> Self {
        if resolved == self.current() {
            self
        } else {
            TripPointer::Repointed {
                from: self.current(),
                to: resolved,
            }
        }
    }

    pub fn was_repointed(&self) -> bool {
        matches!(self, TripPointer::Repointed { .. })
    }
}
