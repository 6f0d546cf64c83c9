use crate::error::AdminError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pre-flight checks run before any request goes out: required fields and
/// simple numeric ranges, nothing schema-grade.
pub trait Validate {
    fn validate(&self) -> Result<(), AdminError>;
}

fn required(field: &'static str, value: &str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        return Err(AdminError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn positive_id(field: &'static str, value: i64) -> Result<(), AdminError> {
    if value <= 0 {
        return Err(AdminError::validation(field, "must reference a record"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StationDraft {
    pub name: String,
    pub code: String,
    pub city: String,
}

impl Validate for StationDraft {
    fn validate(&self) -> Result<(), AdminError> {
        required("name", &self.name)?;
        required("code", &self.code)?;
        required("city", &self.city)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainDraft {
    pub number: String,
    pub name: String,
}

impl Validate for TrainDraft {
    fn validate(&self) -> Result<(), AdminError> {
        required("number", &self.number)?;
        required("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WagonTypeDraft {
    pub name: String,
    pub fare_multiplier: f64,
}

impl Validate for WagonTypeDraft {
    fn validate(&self) -> Result<(), AdminError> {
        required("name", &self.name)?;
        if self.fare_multiplier <= 0.0 {
            return Err(AdminError::validation(
                "fare_multiplier",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WagonAmenityDraft {
    pub name: String,
}

impl Validate for WagonAmenityDraft {
    fn validate(&self) -> Result<(), AdminError> {
        required("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PassengerTypeDraft {
    pub code: String,
    pub name: String,
    pub discount_percent: f64,
    pub requires_document: bool,
}

impl Validate for PassengerTypeDraft {
    fn validate(&self) -> Result<(), AdminError> {
        required("code", &self.code)?;
        required("name", &self.name)?;
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(AdminError::validation(
                "discount_percent",
                "must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteDraft {
    pub origin_id: i64,
    pub destination_id: i64,
    pub distance_km: i64,
}

impl Validate for RouteDraft {
    fn validate(&self) -> Result<(), AdminError> {
        positive_id("origin_id", self.origin_id)?;
        positive_id("destination_id", self.destination_id)?;
        if self.origin_id == self.destination_id {
            return Err(AdminError::validation(
                "destination_id",
                "must differ from the origin",
            ));
        }
        if self.distance_km <= 0 {
            return Err(AdminError::validation(
                "distance_km",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripDraft {
    pub train_id: i64,
    pub route_id: i64,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub base_price: i64,
}

impl Validate for TripDraft {
    fn validate(&self) -> Result<(), AdminError> {
        positive_id("train_id", self.train_id)?;
        positive_id("route_id", self.route_id)?;
        if self.arrival <= self.departure {
            return Err(AdminError::validation(
                "arrival",
                "must be after the departure",
            ));
        }
        if self.base_price <= 0 {
            return Err(AdminError::validation(
                "base_price",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WagonDraft {
    pub trip_id: i64,
    pub wagon_type_id: i64,
    pub number: u32,
    pub total_seats: u32,
}

impl Validate for WagonDraft {
    fn validate(&self) -> Result<(), AdminError> {
        positive_id("trip_id", self.trip_id)?;
        positive_id("wagon_type_id", self.wagon_type_id)?;
        if self.total_seats == 0 {
            return Err(AdminError::validation(
                "total_seats",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
