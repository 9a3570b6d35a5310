pub mod models;
pub mod patch;
pub mod routes;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use courselib_db::SharedRepository;
use courselib_kernel::{InitCtx, Module};
use serde_json::json;

/// Courses, always addressed through their owning author
pub struct CoursesModule {
    repository: SharedRepository,
}

impl CoursesModule {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for CoursesModule {
    fn name(&self) -> &'static str {
        "courses"
    }

    fn mount_path(&self) -> String {
        "/api/authors/{author_id}/courses".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "courses module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let author_id = json!({
            "name": "author_id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" }
        });
        let course_id = json!({
            "name": "course_id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" }
        });
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
        let course = json!({
            "description": "Course",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Course" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "parameters": [author_id.clone()],
                    "get": {
                        "summary": "List the courses of an author",
                        "tags": ["Courses"],
                        "responses": {
                            "200": {
                                "description": "Courses ordered by title",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Course" }
                                        }
                                    }
                                }
                            },
                            "404": error("Author not found")
                        }
                    },
                    "post": {
                        "summary": "Create a course for an author",
                        "tags": ["Courses"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CourseForCreation" }
                                }
                            }
                        },
                        "responses": {
                            "201": course.clone(),
                            "404": error("Author not found"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/{course_id}": {
                    "parameters": [author_id, course_id],
                    "get": {
                        "summary": "Get one course of an author",
                        "tags": ["Courses"],
                        "responses": {
                            "200": course.clone(),
                            "404": error("Author or course not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a course, creating it under this id if absent",
                        "tags": ["Courses"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CourseForUpdate" }
                                }
                            }
                        },
                        "responses": {
                            "201": course.clone(),
                            "204": { "description": "Course replaced" },
                            "404": error("Author not found"),
                            "422": error("Validation error")
                        }
                    },
                    "patch": {
                        "summary": "Apply a JSON Patch document, creating the course if absent",
                        "tags": ["Courses"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json-patch+json": {
                                    "schema": { "$ref": "#/components/schemas/PatchDocument" }
                                },
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/PatchDocument" }
                                }
                            }
                        },
                        "responses": {
                            "201": course,
                            "204": { "description": "Course patched" },
                            "404": error("Author not found"),
                            "422": error("Patch could not be applied or result is invalid")
                        }
                    },
                    "delete": {
                        "summary": "Delete a course",
                        "tags": ["Courses"],
                        "responses": {
                            "204": { "description": "Course deleted" },
                            "404": error("Author or course not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Course": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "title": { "type": "string" },
                            "description": { "type": ["string", "null"] },
                            "authorId": { "type": "string", "format": "uuid" }
                        },
                        "required": ["id", "title", "authorId"]
                    },
                    "CourseForCreation": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "maxLength": validation::TITLE_MAX_CHARS },
                            "description": {
                                "type": "string",
                                "maxLength": validation::DESCRIPTION_MAX_CHARS
                            }
                        },
                        "required": ["title"]
                    },
                    "CourseForUpdate": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "maxLength": validation::TITLE_MAX_CHARS },
                            "description": {
                                "type": "string",
                                "maxLength": validation::DESCRIPTION_MAX_CHARS
                            }
                        },
                        "required": ["title", "description"]
                    },
                    "PatchDocument": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "op": {
                                    "type": "string",
                                    "enum": ["add", "remove", "replace", "test", "move", "copy"]
                                },
                                "path": { "type": "string", "enum": ["/title", "/description"] },
                                "from": { "type": "string" },
                                "value": {}
                            },
                            "required": ["op", "path"]
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "courses module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "courses module stopped");
        Ok(())
    }
}

/// Create a new instance of the courses module
pub fn create_module(repository: SharedRepository) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(CoursesModule::new(repository))
}
