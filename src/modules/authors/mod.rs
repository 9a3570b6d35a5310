pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use courselib_db::SharedRepository;
use courselib_kernel::{InitCtx, Module};
use serde_json::json;

/// Authors module
pub struct AuthorsModule {
    repository: SharedRepository,
}

impl AuthorsModule {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let author = json!({
            "description": "Author",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Author" }
                }
            }
        });
        let not_found = json!({
            "description": "Author not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let author_id = json!({
            "name": "author_id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "parameters": [
                            {
                                "name": "mainCategory",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "searchQuery",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Authors ordered by name",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Author" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create an author with optional courses",
                        "tags": ["Authors"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AuthorForCreation" }
                                }
                            }
                        },
                        "responses": {
                            "201": author.clone(),
                            "400": {
                                "description": "Malformed body",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "options": {
                        "summary": "Advertise the supported methods",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "Supported methods in the Allow header",
                                "headers": {
                                    "Allow": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                },
                "/{author_id}": {
                    "parameters": [author_id],
                    "get": {
                        "summary": "Get an author",
                        "tags": ["Authors"],
                        "responses": {
                            "200": author,
                            "404": not_found.clone()
                        }
                    },
                    "delete": {
                        "summary": "Delete an author and its courses",
                        "tags": ["Authors"],
                        "responses": {
                            "204": { "description": "Author deleted" },
                            "404": not_found
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "name": { "type": "string" },
                            "age": { "type": "integer" },
                            "mainCategory": { "type": "string" }
                        },
                        "required": ["id", "name", "age", "mainCategory"]
                    },
                    "AuthorForCreation": {
                        "type": "object",
                        "properties": {
                            "firstName": { "type": "string" },
                            "lastName": { "type": "string" },
                            "dateOfBirth": { "type": "string", "format": "date-time" },
                            "mainCategory": { "type": "string" },
                            "courses": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/CourseForCreation" }
                            }
                        },
                        "required": ["firstName", "lastName", "dateOfBirth", "mainCategory"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module
pub fn create_module(repository: SharedRepository) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(repository))
}
