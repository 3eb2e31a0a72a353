//! Record store seam for cars and the in-memory implementation used for local
//! runs and tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::OperationFailure;
use super::models::{CarFields, CarRecord, UserCar};

/// Optional `WHERE` constraints for listing cars. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub size: Option<String>,
    pub is_currently_rented: Option<bool>,
}

impl CarFilter {
    fn matches(&self, car: &CarRecord) -> bool {
        self.size.as_deref().map_or(true, |size| car.size == size)
            && self
                .is_currently_rented
                .map_or(true, |rented| car.is_currently_rented == rented)
    }
}

/// Association joined into list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Include {
    pub model: &'static str,
    /// Key the association is attached under
    pub alias: &'static str,
    /// `true` drops cars without an associated row (inner join)
    pub required: bool,
}

impl Include {
    /// The current renter, joined as `userCar`, optional.
    pub const fn renter() -> Self {
        Self {
            model: "UserCar",
            alias: "userCar",
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindAllOptions {
    pub filter: CarFilter,
    pub include: Include,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOptions {
    pub filter: CarFilter,
    pub include: Include,
}

/// Persistence collaborator behind the car endpoints.
///
/// Ids are passed through exactly as they arrived on the request; parsing
/// them is the store's business.
#[async_trait]
pub trait CarRecordStore: Send + Sync {
    async fn find_all(&self, options: FindAllOptions) -> Result<Vec<CarRecord>, OperationFailure>;

    async fn count(&self, options: CountOptions) -> Result<u64, OperationFailure>;

    async fn create(&self, fields: CarFields) -> Result<CarRecord, OperationFailure>;

    async fn find_by_pk(&self, id: &str) -> Result<Option<CarRecord>, OperationFailure>;

    /// Remove a car, returning the number of rows deleted.
    async fn destroy(&self, id: &str) -> Result<u64, OperationFailure>;

    /// Merge `fields` onto an existing record. Absent descriptive fields keep
    /// their stored value.
    async fn update(&self, car: CarRecord, fields: CarFields)
        -> Result<CarRecord, OperationFailure>;
}

#[derive(Debug, Default)]
struct Tables {
    cars: BTreeMap<u64, CarRecord>,
    /// Keyed by car id; a car has at most one active renter
    rentals: BTreeMap<u64, UserCar>,
    next_rental_id: u64,
}

/// Process-local store backed by ordered maps.
#[derive(Debug)]
pub struct InMemoryCarStore {
    tables: RwLock<Tables>,
    next_id: AtomicU64,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Record `user_id` as the renter of `car_id` and flag the car as rented.
    pub async fn assign_renter(
        &self,
        car_id: u64,
        user_id: u64,
    ) -> Result<UserCar, OperationFailure> {
        let mut tables = self.tables.write().await;
        let Some(car) = tables.cars.get_mut(&car_id) else {
            return Err(OperationFailure::not_found(&car_id.to_string()));
        };
        car.is_currently_rented = true;

        tables.next_rental_id += 1;
        let rental = UserCar {
            id: tables.next_rental_id,
            user_id,
            car_id,
        };
        tables.rentals.insert(car_id, rental.clone());
        tracing::debug!(car_id, user_id, "renter assigned");
        Ok(rental)
    }

    fn joined<'a>(tables: &'a Tables, include: Include) -> impl Iterator<Item = CarRecord> + 'a {
        tables.cars.values().filter_map(move |car| {
            let rental = tables.rentals.get(&car.id);
            if include.required && rental.is_none() {
                return None;
            }
            let mut car = car.clone();
            car.user_car = rental.cloned();
            Some(car)
        })
    }
}

impl Default for InMemoryCarStore {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_id(id: &str) -> Option<u64> {
    id.trim().parse().ok()
}

fn required_text(value: Option<String>, field: &str, problems: &mut Vec<String>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        Some(_) => {
            problems.push(format!("{} cannot be empty", field));
            String::new()
        }
        None => {
            problems.push(format!("{} is required", field));
            String::new()
        }
    }
}

fn check_price(price: i64, problems: &mut Vec<String>) {
    if price < 0 {
        problems.push("price cannot be negative".to_string());
    }
}

fn into_result(problems: Vec<String>) -> Result<(), OperationFailure> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(OperationFailure::validation(problems.join(", ")))
    }
}

#[async_trait]
impl CarRecordStore for InMemoryCarStore {
    async fn find_all(&self, options: FindAllOptions) -> Result<Vec<CarRecord>, OperationFailure> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(options.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(options.limit).unwrap_or(usize::MAX);

        Ok(Self::joined(&tables, options.include)
            .filter(|car| options.filter.matches(car))
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count(&self, options: CountOptions) -> Result<u64, OperationFailure> {
        let tables = self.tables.read().await;
        let count = Self::joined(&tables, options.include)
            .filter(|car| options.filter.matches(car))
            .count();
        Ok(count as u64)
    }

    async fn create(&self, fields: CarFields) -> Result<CarRecord, OperationFailure> {
        let mut problems = Vec::new();
        let name = required_text(fields.name, "name", &mut problems);
        let size = required_text(fields.size, "size", &mut problems);
        let image = required_text(fields.image, "image", &mut problems);
        let price = match fields.price {
            Some(price) => {
                check_price(price, &mut problems);
                price
            }
            None => {
                problems.push("price is required".to_string());
                0
            }
        };
        into_result(problems)?;

        let car = CarRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name,
            price,
            size,
            image,
            is_currently_rented: fields.is_currently_rented,
            user_car: None,
        };

        self.tables.write().await.cars.insert(car.id, car.clone());
        tracing::debug!(car_id = car.id, "car created");
        Ok(car)
    }

    async fn find_by_pk(&self, id: &str) -> Result<Option<CarRecord>, OperationFailure> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn destroy(&self, id: &str) -> Result<u64, OperationFailure> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };
        let mut tables = self.tables.write().await;
        tables.rentals.remove(&id);
        Ok(u64::from(tables.cars.remove(&id).is_some()))
    }

    async fn update(
        &self,
        car: CarRecord,
        fields: CarFields,
    ) -> Result<CarRecord, OperationFailure> {
        let mut problems = Vec::new();
        let name = fields
            .name
            .map(|name| required_text(Some(name), "name", &mut problems));
        let size = fields
            .size
            .map(|size| required_text(Some(size), "size", &mut problems));
        let image = fields
            .image
            .map(|image| required_text(Some(image), "image", &mut problems));
        if let Some(price) = fields.price {
            check_price(price, &mut problems);
        }
        into_result(problems)?;

        let mut tables = self.tables.write().await;
        let Some(stored) = tables.cars.get_mut(&car.id) else {
            return Err(OperationFailure::not_found(&car.id.to_string()));
        };

        if let Some(name) = name {
            stored.name = name;
        }
        if let Some(price) = fields.price {
            stored.price = price;
        }
        if let Some(size) = size {
            stored.size = size;
        }
        if let Some(image) = image {
            stored.image = image;
        }
        stored.is_currently_rented = fields.is_currently_rented;

        let updated = stored.clone();
        if !updated.is_currently_rented {
            tables.rentals.remove(&updated.id);
        }
        tracing::debug!(car_id = updated.id, "car updated");
        Ok(updated)
    }
}
