//! Rule-based risk scoring for business loan applications, with the prediction boundary
//! that serves it over HTTP.

pub mod config;
pub mod error;
pub mod portfolio;
pub mod prediction;
pub mod scoring;
pub mod simulation;
pub mod telemetry;
