use crate::filter::{filter_trips, TripFilter};
use crate::paginate::Paginator;
use chrono::NaiveDate;
use railbook_api::{ApiResult, BookingBackend, RetryPolicy};
use railbook_shared::Trip;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin_id: i64,
    pub destination_id: i64,
    pub date: NaiveDate,
}

/// Search screen controller: one fetch per query, then purely client-side
/// filtering and pagination. No server-side filter parameters are used once
/// the initial list is in.
pub struct SearchFlow {
    backend: Arc<dyn BookingBackend>,
    retry: RetryPolicy,
    results: Vec<Trip>,
    filtered: Vec<Trip>,
    filter: TripFilter,
    paginator: Paginator,
}

impl SearchFlow {
    pub fn new(backend: Arc<dyn BookingBackend>, retry: RetryPolicy, page_size: usize) -> Self {
        Self {
            backend,
            retry,
            results: Vec::new(),
            filtered: Vec::new(),
            filter: TripFilter::default(),
            paginator: Paginator::new(page_size),
        }
    }

    pub async fn run(&mut self, query: &SearchQuery) -> ApiResult<()> {
        let backend = self.backend.clone();
        let results = self
            .retry
            .run("trip search", || {
                backend.search_trips(query.origin_id, query.destination_id, query.date)
            })
            .await?;

        tracing::debug!(count = results.len(), "search results fetched");
        self.results = results;
        self.refilter();
        Ok(())
    }

    /// Recomputed on every filter-control change; always lands on page one.
    pub fn set_filter(&mut self, filter: TripFilter) {
        self.filter = filter;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_trips(&self.results, &self.filter);
        self.paginator.reset();
    }

    pub fn filter(&self) -> &TripFilter {
        &self.filter
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.filtered.len())
    }

    pub fn current_page(&self) -> usize {
        self.paginator.page
    }

    pub fn page_items(&self) -> &[Trip] {
        self.paginator.slice(&self.filtered)
    }

    pub fn next_page(&mut self) {
        self.paginator.next_page(self.filtered.len());
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use railbook_api::ApiError;
    use railbook_shared::{
        AvailabilitySnapshot, CreateOrderRequest, Order, PassengerType, Route, Seat, Station,
        Train, Wagon,
    };

    struct FixedBackend {
        trips: Vec<Trip>,
    }

    #[async_trait]
    impl BookingBackend for FixedBackend {
        async fn get_trip(&self, trip_id: i64) -> ApiResult<Trip> {
            self.trips
                .iter()
                .find(|t| t.id == trip_id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    detail: "trip not found".to_string(),
                })
        }

        async fn get_availability(
            &self,
            _trip_id: i64,
            _date: NaiveDate,
            _passengers: u32,
        ) -> ApiResult<AvailabilitySnapshot> {
            unimplemented!("not used by search tests")
        }

        async fn list_wagons(&self, _trip_id: i64) -> ApiResult<Vec<Wagon>> {
            unimplemented!("not used by search tests")
        }

        async fn list_seats(&self, _wagon_id: i64) -> ApiResult<Vec<Seat>> {
            unimplemented!("not used by search tests")
        }

        async fn search_trips(
            &self,
            _origin_id: i64,
            _destination_id: i64,
            _date: NaiveDate,
        ) -> ApiResult<Vec<Trip>> {
            Ok(self.trips.clone())
        }

        async fn list_passenger_types(&self) -> ApiResult<Vec<PassengerType>> {
            Ok(Vec::new())
        }

        async fn create_order(&self, _req: &CreateOrderRequest) -> ApiResult<Order> {
            unimplemented!("not used by search tests")
        }
    }

    fn trip(id: i64, dep_hour: u32) -> Trip {
        let station = |id: i64, code: &str| Station {
            id,
            name: format!("{code} Central"),
            code: code.to_string(),
            city: code.to_string(),
        };
        let departure = Utc.with_ymd_and_hms(2026, 9, 1, dep_hour, 0, 0).unwrap();
        Trip {
            id,
            train: Train {
                id: 1,
                number: "R 11".to_string(),
                name: "Local".to_string(),
            },
            route: Route {
                id: 1,
                origin: station(1, "AAA"),
                destination: station(2, "BBB"),
                distance_km: 120,
            },
            departure,
            arrival: departure + chrono::Duration::hours(2),
            base_price: 1200,
            duration_minutes: 120,
            classes: vec!["Normal".to_string()],
        }
    }

    fn query() -> SearchQuery {
        SearchQuery {
            origin_id: 1,
            destination_id: 2,
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_filter_change_resets_to_page_one() {
        let backend = Arc::new(FixedBackend {
            trips: (0..12).map(|i| trip(i, (6 + i as u32) % 24)).collect(),
        });
        let mut flow = SearchFlow::new(backend, RetryPolicy::single_attempt(), 5);
        flow.run(&query()).await.unwrap();

        flow.next_page();
        assert_eq!(flow.current_page(), 2);

        flow.set_filter(TripFilter {
            departure_hours: Some((6, 17)),
            ..Default::default()
        });
        assert_eq!(flow.current_page(), 1);
        assert_eq!(flow.filtered_len(), 12);
    }

    #[tokio::test]
    async fn test_pagination_over_filtered_results() {
        let backend = Arc::new(FixedBackend {
            trips: (0..25).map(|i| trip(i, 8)).collect(),
        });
        let mut flow = SearchFlow::new(backend, RetryPolicy::single_attempt(), 10);
        flow.run(&query()).await.unwrap();

        assert_eq!(flow.page_count(), 3);
        assert_eq!(flow.page_items().len(), 10);

        flow.next_page();
        flow.next_page();
        assert_eq!(flow.page_items().len(), 5);
    }
}
