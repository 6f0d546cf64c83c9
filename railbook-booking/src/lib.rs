pub mod draft;
pub mod flow;
pub mod pointer;
pub mod seat_map;
pub mod wagons;

pub use draft::{DraftBooking, DraftError, PassengerDetails, SeatToggle};
pub use flow::{BookingFlow, BookingStage, FlowError};
pub use pointer::TripPointer;
pub use seat_map::{SeatMap, SeatMapSource};
pub use wagons::{WagonSource, WagonView};
