//! Marketplace domain: preference model, pure services, repository traits

pub mod model;
pub mod repository;
pub mod service;
