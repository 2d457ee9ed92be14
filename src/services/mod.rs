//! Business logic sitting between the HTTP routes and the engine.

pub mod documentation;
pub mod health_service;
pub mod match_service;
