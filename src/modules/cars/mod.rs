pub mod controller;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use rental_kernel::settings::Settings;
use rental_kernel::{InitCtx, Module};

use crate::utils;
use controller::CarController;
use models::CarInput;
use store::{CarRecordStore, InMemoryCarStore};

/// Cars resource: list, create, read, update and delete rentable cars
pub struct CarsModule {
    controller: Arc<CarController>,
}

impl CarsModule {
    pub fn new(store: Arc<dyn CarRecordStore>, settings: &Settings) -> Self {
        Self {
            controller: Arc::new(CarController::new(store, settings.pagination.clone())),
        }
    }

    /// Load cars from a JSON array file through the normal create path.
    async fn seed_from(&self, path: &Path) -> anyhow::Result<usize> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let inputs: Vec<CarInput> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;

        let total = inputs.len();
        for (index, input) in inputs.into_iter().enumerate() {
            self.controller
                .create_car(input)
                .await
                .with_context(|| format!("seed entry {} was rejected", index))?;
        }
        Ok(total)
    }
}

#[async_trait]
impl Module for CarsModule {
    fn name(&self) -> &'static str {
        "cars"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let prefix = utils::log_prefix(self.name());

        if let Some(path) = &ctx.settings.store.seed_path {
            let seeded = self.seed_from(path).await?;
            tracing::info!(%prefix, seeded, path = %path.display(), "cars seeded");
        }

        tracing::info!(
            %prefix,
            environment = ?ctx.settings.environment,
            "cars module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.controller.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = serde_json::json!({
            "description": "Operation rejected",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let car_response = |description: &str| {
            serde_json::json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Car" }
                    }
                }
            })
        };
        let car_body = serde_json::json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CarInput" }
                }
            }
        });
        let id_param = serde_json::json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        }]);

        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List cars",
                        "tags": ["Cars"],
                        "parameters": [
                            {
                                "name": "page",
                                "in": "query",
                                "schema": { "type": "integer", "minimum": 1 }
                            },
                            {
                                "name": "pageSize",
                                "in": "query",
                                "schema": { "type": "integer", "minimum": 1 }
                            },
                            { "name": "size", "in": "query", "schema": { "type": "string" } },
                            {
                                "name": "isCurrentlyRented",
                                "in": "query",
                                "schema": { "type": "boolean" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "A page of cars",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/CarList" }
                                    }
                                }
                            },
                            "400": error_response.clone()
                        }
                    },
                    "post": {
                        "summary": "Create a car",
                        "tags": ["Cars"],
                        "requestBody": car_body.clone(),
                        "responses": {
                            "201": car_response("Created car"),
                            "422": error_response.clone()
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a car; the body is null when it does not exist",
                        "tags": ["Cars"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": car_response("Car or null")
                        }
                    },
                    "put": {
                        "summary": "Update a car",
                        "tags": ["Cars"],
                        "parameters": id_param.clone(),
                        "requestBody": car_body,
                        "responses": {
                            "200": car_response("Updated car"),
                            "422": error_response
                        }
                    },
                    "delete": {
                        "summary": "Delete a car",
                        "tags": ["Cars"],
                        "parameters": id_param,
                        "responses": {
                            "204": { "description": "Deleted, or never existed" }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Cars health check",
                        "tags": ["Cars"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Car": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "price": { "type": "integer" },
                            "size": { "type": "string" },
                            "image": { "type": "string" },
                            "isCurrentlyRented": { "type": "boolean" },
                            "userCar": { "$ref": "#/components/schemas/UserCar" }
                        },
                        "required": ["id", "name", "price", "size", "image", "isCurrentlyRented"]
                    },
                    "UserCar": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "userId": { "type": "integer" },
                            "carId": { "type": "integer" }
                        },
                        "required": ["id", "userId", "carId"]
                    },
                    "CarInput": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "price": { "type": "integer" },
                            "size": { "type": "string" },
                            "image": { "type": "string" },
                            "isCurrentlyRented": { "type": "boolean", "default": false }
                        }
                    },
                    "CarList": {
                        "type": "object",
                        "properties": {
                            "cars": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Car" }
                            },
                            "meta": {
                                "type": "object",
                                "properties": {
                                    "pagination": {
                                        "type": "object",
                                        "properties": {
                                            "page": { "type": "integer" },
                                            "pageSize": { "type": "integer" },
                                            "count": { "type": "integer" },
                                            "pageCount": { "type": "integer" }
                                        }
                                    }
                                }
                            }
                        },
                        "required": ["cars", "meta"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "cars module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "cars module stopped");
        Ok(())
    }
}

/// Create the cars module backed by the in-memory store
pub fn create_module(settings: &Settings) -> Arc<dyn Module> {
    Arc::new(CarsModule::new(Arc::new(InMemoryCarStore::new()), settings))
}
