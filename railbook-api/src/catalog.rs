//! `/station/*` operations: stations, trips, availability, wagons, seats,
//! and the reference collections behind them.

use crate::client::ApiClient;
use crate::error::ApiResult;
use chrono::NaiveDate;
use railbook_shared::{
    AvailabilitySnapshot, Route, Seat, Station, Train, Trip, Wagon, WagonAmenity, WagonType,
};
use reqwest::Method;

impl ApiClient {
    pub async fn list_stations(&self) -> ApiResult<Vec<Station>> {
        self.get_json("/station/stations/").await
    }

    pub async fn get_station(&self, id: i64) -> ApiResult<Station> {
        self.get_json(&format!("/station/stations/{}/", id)).await
    }

    pub async fn autocomplete_stations(&self, query: &str) -> ApiResult<Vec<Station>> {
        let rb = self
            .request(Method::GET, "/station/stations/autocomplete/")
            .await?
            .query(&[("q", query)]);
        self.execute(rb).await
    }

    pub async fn search_trips(
        &self,
        origin_id: i64,
        destination_id: i64,
        date: NaiveDate,
    ) -> ApiResult<Vec<Trip>> {
        let rb = self
            .request(Method::GET, "/station/trips/")
            .await?
            .query(&[
                ("origin", origin_id.to_string()),
                ("destination", destination_id.to_string()),
                ("date", date.to_string()),
            ]);
        self.execute(rb).await
    }

    pub async fn get_trip(&self, id: i64) -> ApiResult<Trip> {
        self.get_json(&format!("/station/trips/{}/", id)).await
    }

    /// Availability keyed by (trip, date, passenger count). The entry for a
    /// given date may name a different concrete trip id than the one asked
    /// about; callers must follow it.
    pub async fn get_availability(
        &self,
        trip_id: i64,
        date: NaiveDate,
        passengers: u32,
    ) -> ApiResult<AvailabilitySnapshot> {
        let rb = self
            .request(
                Method::GET,
                &format!("/station/trips/{}/availability/", trip_id),
            )
            .await?
            .query(&[
                ("date", date.to_string()),
                ("passengers", passengers.to_string()),
            ]);
        self.execute(rb).await
    }

    pub async fn list_wagons(&self, trip_id: i64) -> ApiResult<Vec<Wagon>> {
        self.get_json(&format!("/station/trips/{}/wagons/", trip_id))
            .await
    }

    pub async fn list_seats(&self, wagon_id: i64) -> ApiResult<Vec<Seat>> {
        self.get_json(&format!("/station/wagons/{}/seats/", wagon_id))
            .await
    }

    pub async fn list_routes(&self) -> ApiResult<Vec<Route>> {
        self.get_json("/station/routes/").await
    }

    pub async fn get_route(&self, id: i64) -> ApiResult<Route> {
        self.get_json(&format!("/station/routes/{}/", id)).await
    }

    pub async fn list_trains(&self) -> ApiResult<Vec<Train>> {
        self.get_json("/station/trains/").await
    }

    pub async fn list_wagon_types(&self) -> ApiResult<Vec<WagonType>> {
        self.get_json("/station/wagon-types/").await
    }

    pub async fn list_wagon_amenities(&self) -> ApiResult<Vec<WagonAmenity>> {
        self.get_json("/station/wagon-amenities/").await
    }
}
