pub mod format;
pub mod models;

pub use models::{
    AuthTokens, AvailabilitySnapshot, ClassAvailability, CreateOrderRequest, DateAvailability,
    Order, OrderStatus, PassengerType, Route, Seat, Station, Ticket, TicketRequest, Train, Trip,
    UserProfile, Wagon, WagonAmenity, WagonType,
};
