//! Car operations. Each one makes a single pass through the store and hands
//! an explicit result back to the HTTP layer.

use std::sync::Arc;

use rental_kernel::settings::PaginationSettings;

use super::error::OperationFailure;
use super::models::{apply_defaults, CarInput, CarList, CarRecord, ListMeta};
use super::store::{CarFilter, CarRecordStore, CountOptions, FindAllOptions, Include};
use crate::utils::pagination::{PageRequest, PaginationError, PaginationMeta};

pub struct CarController {
    store: Arc<dyn CarRecordStore>,
    pagination: PaginationSettings,
}

impl CarController {
    pub fn new(store: Arc<dyn CarRecordStore>, pagination: PaginationSettings) -> Self {
        Self { store, pagination }
    }

    /// Resolve `page`/`pageSize` query values against the configured bounds.
    pub fn page_request(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<PageRequest, PaginationError> {
        PageRequest::resolve(page, page_size, &self.pagination)
    }

    pub async fn list_cars(
        &self,
        page: PageRequest,
        filter: CarFilter,
    ) -> Result<CarList, OperationFailure> {
        let include = Include::renter();

        let cars = self
            .store
            .find_all(FindAllOptions {
                filter: filter.clone(),
                include,
                offset: page.offset(),
                limit: page.limit(),
            })
            .await?;
        let count = self.store.count(CountOptions { filter, include }).await?;

        Ok(CarList {
            cars,
            meta: ListMeta {
                pagination: PaginationMeta::new(page, count),
            },
        })
    }

    pub async fn create_car(&self, input: CarInput) -> Result<CarRecord, OperationFailure> {
        let car = self.store.create(apply_defaults(input)).await?;
        tracing::info!(car_id = car.id, "car created");
        Ok(car)
    }

    /// Look up a car; an absent record is a successful `None`.
    pub async fn get_car(&self, id: &str) -> Result<Option<CarRecord>, OperationFailure> {
        self.store.find_by_pk(id).await
    }

    /// Resolve the car a request targets, failing when it does not exist.
    pub async fn get_car_from_request(&self, id: &str) -> Result<CarRecord, OperationFailure> {
        self.store
            .find_by_pk(id)
            .await?
            .ok_or_else(|| OperationFailure::not_found(id))
    }

    pub async fn update_car(
        &self,
        id: &str,
        input: CarInput,
    ) -> Result<CarRecord, OperationFailure> {
        let car = self.get_car_from_request(id).await?;
        let car = self.store.update(car, apply_defaults(input)).await?;
        tracing::info!(car_id = car.id, "car updated");
        Ok(car)
    }

    /// Destroy by raw id. Missing cars are not an error.
    pub async fn delete_car(&self, id: &str) -> Result<(), OperationFailure> {
        let deleted = self.store.destroy(id).await?;
        tracing::info!(car_id = %id, deleted, "car destroyed");
        Ok(())
    }
}
