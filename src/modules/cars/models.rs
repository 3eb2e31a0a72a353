use serde::{Deserialize, Serialize};

use crate::utils::pagination::PaginationMeta;

/// A rentable car as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    /// Identity assigned by the store on creation
    pub id: u64,
    pub name: String,
    pub price: i64,
    /// Size category such as `small`, `medium`, or `large`
    pub size: String,
    /// Path or URL of the car's picture
    pub image: String,
    pub is_currently_rented: bool,
    /// Current renter, present only when the renter association was joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_car: Option<UserCar>,
}

/// Join row linking a renter to the car they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCar {
    pub id: u64,
    pub user_id: u64,
    pub car_id: u64,
}

/// Request body for creating or updating a car. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub is_currently_rented: Option<bool>,
}

/// Field values handed to the store. `is_currently_rented` is always set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFields {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub is_currently_rented: bool,
}

/// Build store fields from a request body; a missing rental flag means `false`.
pub fn apply_defaults(input: CarInput) -> CarFields {
    CarFields {
        name: input.name,
        price: input.price,
        size: input.size,
        image: input.image,
        is_currently_rented: input.is_currently_rented.unwrap_or(false),
    }
}

/// Response body of the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarList {
    pub cars: Vec<CarRecord>,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
}
