// Application layer - Use cases and repository contracts
pub mod dashboard_service;
pub mod error;
pub mod series_repository;
