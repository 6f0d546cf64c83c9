use crate::error::AdminError;
use crate::validate::{
    PassengerTypeDraft, RouteDraft, StationDraft, TrainDraft, TripDraft, Validate,
    WagonAmenityDraft, WagonDraft, WagonTypeDraft,
};
use async_trait::async_trait;
use railbook_api::ApiClient;
use railbook_shared::{
    PassengerType, Route, Station, Train, Trip, Wagon, WagonAmenity, WagonType,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// One reference-data collection as the admin screens see it. `RestCollection`
/// is the real implementation; tests substitute in-memory doubles.
#[async_trait]
pub trait AdminResource: Send + Sync {
    type Item: Send;
    type Draft: Validate + Send + Sync;

    async fn list(&self) -> Result<Vec<Self::Item>, AdminError>;
    async fn create(&self, draft: &Self::Draft) -> Result<Self::Item, AdminError>;
    async fn update(&self, id: i64, draft: &Self::Draft) -> Result<Self::Item, AdminError>;
    async fn delete(&self, id: i64) -> Result<(), AdminError>;
}

/// A collection living at one REST path, with item routes at `{path}{id}/`.
pub struct RestCollection<I, D> {
    client: Arc<ApiClient>,
    path: &'static str,
    _marker: PhantomData<fn() -> (I, D)>,
}

impl<I, D> RestCollection<I, D> {
    fn new(client: Arc<ApiClient>, path: &'static str) -> Self {
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.path, id)
    }
}

#[async_trait]
impl<I, D> AdminResource for RestCollection<I, D>
where
    I: DeserializeOwned + Send + Sync + 'static,
    D: Validate + Serialize + Send + Sync + 'static,
{
    type Item = I;
    type Draft = D;

    async fn list(&self) -> Result<Vec<I>, AdminError> {
        Ok(self.client.get_json(self.path).await?)
    }

    async fn create(&self, draft: &D) -> Result<I, AdminError> {
        Ok(self.client.post_json(self.path, draft).await?)
    }

    async fn update(&self, id: i64, draft: &D) -> Result<I, AdminError> {
        Ok(self.client.put_json(&self.item_path(id), draft).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), AdminError> {
        Ok(self.client.delete_resource(&self.item_path(id)).await?)
    }
}

pub fn stations(client: Arc<ApiClient>) -> RestCollection<Station, StationDraft> {
    RestCollection::new(client, "/station/stations/")
}

pub fn trains(client: Arc<ApiClient>) -> RestCollection<Train, TrainDraft> {
    RestCollection::new(client, "/station/trains/")
}

pub fn wagon_types(client: Arc<ApiClient>) -> RestCollection<WagonType, WagonTypeDraft> {
    RestCollection::new(client, "/station/wagon-types/")
}

pub fn wagon_amenities(
    client: Arc<ApiClient>,
) -> RestCollection<WagonAmenity, WagonAmenityDraft> {
    RestCollection::new(client, "/station/wagon-amenities/")
}

pub fn passenger_types(
    client: Arc<ApiClient>,
) -> RestCollection<PassengerType, PassengerTypeDraft> {
    RestCollection::new(client, "/booking/passenger-types/")
}

pub fn routes(client: Arc<ApiClient>) -> RestCollection<Route, RouteDraft> {
    RestCollection::new(client, "/station/routes/")
}

pub fn trips(client: Arc<ApiClient>) -> RestCollection<Trip, TripDraft> {
    RestCollection::new(client, "/station/trips/")
}

pub fn wagons(client: Arc<ApiClient>) -> RestCollection<Wagon, WagonDraft> {
    RestCollection::new(client, "/station/wagons/")
}
