pub mod configuration;
pub mod domain;
pub mod entities;
pub mod lifecycle;
pub mod repository;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
mod test_support;
