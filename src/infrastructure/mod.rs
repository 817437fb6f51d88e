// Infrastructure layer - External dependencies and adapters
pub mod chart_payload;
pub mod config;
pub mod http_response;
pub mod postgres_connection;
pub mod postgres_repository;
