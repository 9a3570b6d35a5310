pub mod routes;

use async_trait::async_trait;
use axum::Router;
use courselib_db::SharedRepository;
use courselib_kernel::{InitCtx, Module};
use serde_json::json;

/// Batch read and create of authors
pub struct AuthorCollectionsModule {
    repository: SharedRepository,
}

impl AuthorCollectionsModule {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for AuthorCollectionsModule {
    fn name(&self) -> &'static str {
        "authorcollections"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author collections module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let authors = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Author" }
                        }
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Always rejected; an id list is required",
                        "tags": ["Author collections"],
                        "responses": {
                            "400": error("Id list missing")
                        }
                    },
                    "post": {
                        "summary": "Create several authors in one batch",
                        "tags": ["Author collections"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/AuthorForCreation" }
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": authors("Created authors; Location lists their ids"),
                            "400": error("Malformed or empty body"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/{ids}": {
                    "get": {
                        "summary": "Fetch authors by a comma separated id list",
                        "tags": ["Author collections"],
                        "parameters": [{
                            "name": "ids",
                            "in": "path",
                            "required": true,
                            "description": "Ids as `(id1,id2,...)`",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": authors("Every requested author"),
                            "400": error("Id list missing or malformed"),
                            "404": error("At least one id did not resolve")
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author collections module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author collections module stopped");
        Ok(())
    }
}

/// Create a new instance of the author collections module
pub fn create_module(repository: SharedRepository) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorCollectionsModule::new(repository))
}
