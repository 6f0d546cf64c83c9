use crate::client::ApiClient;
use crate::error::ApiResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use railbook_shared::{
    AvailabilitySnapshot, CreateOrderRequest, Order, PassengerType, Seat, Trip, UserProfile, Wagon,
};

/// The seam the search and booking flows consume. `ApiClient` is the real
/// implementation; tests substitute in-memory doubles.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn get_trip(&self, trip_id: i64) -> ApiResult<Trip>;

    async fn get_availability(
        &self,
        trip_id: i64,
        date: NaiveDate,
        passengers: u32,
    ) -> ApiResult<AvailabilitySnapshot>;

    async fn list_wagons(&self, trip_id: i64) -> ApiResult<Vec<Wagon>>;

    async fn list_seats(&self, wagon_id: i64) -> ApiResult<Vec<Seat>>;

    async fn search_trips(
        &self,
        origin_id: i64,
        destination_id: i64,
        date: NaiveDate,
    ) -> ApiResult<Vec<Trip>>;

    async fn list_passenger_types(&self) -> ApiResult<Vec<PassengerType>>;

    async fn create_order(&self, req: &CreateOrderRequest) -> ApiResult<Order>;
}

#[async_trait]
impl BookingBackend for ApiClient {
    async fn get_trip(&self, trip_id: i64) -> ApiResult<Trip> {
        ApiClient::get_trip(self, trip_id).await
    }

    async fn get_availability(
        &self,
        trip_id: i64,
        date: NaiveDate,
        passengers: u32,
    ) -> ApiResult<AvailabilitySnapshot> {
        ApiClient::get_availability(self, trip_id, date, passengers).await
    }

    async fn list_wagons(&self, trip_id: i64) -> ApiResult<Vec<Wagon>> {
        ApiClient::list_wagons(self, trip_id).await
    }

    async fn list_seats(&self, wagon_id: i64) -> ApiResult<Vec<Seat>> {
        ApiClient::list_seats(self, wagon_id).await
    }

    async fn search_trips(
        &self,
        origin_id: i64,
        destination_id: i64,
        date: NaiveDate,
    ) -> ApiResult<Vec<Trip>> {
        ApiClient::search_trips(self, origin_id, destination_id, date).await
    }

    async fn list_passenger_types(&self) -> ApiResult<Vec<PassengerType>> {
        ApiClient::list_passenger_types(self).await
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> ApiResult<Order> {
        ApiClient::create_order(self, req).await
    }
}

/// Identity operations the session provider needs.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn me(&self) -> ApiResult<UserProfile>;
    async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile>;
    async fn logout(&self) -> ApiResult<()>;
}

#[async_trait]
impl IdentityBackend for ApiClient {
    async fn me(&self) -> ApiResult<UserProfile> {
        ApiClient::me(self).await
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        ApiClient::login(self, email, password).await
    }

    async fn logout(&self) -> ApiResult<()> {
        ApiClient::logout(self).await
    }
}
