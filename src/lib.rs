//! Downtime Ledger - financial cost accounting for reliability incidents
//!
//! This library prices service incidents with a time-of-day rate schedule
//! and MTTR / discovery multipliers, records them in an ordered store, and
//! summarises losses against an annual budget.

pub mod budget;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod currency;
pub mod engine;
pub mod error;
pub mod incident;
pub mod json_output;
pub mod rates;
pub mod rules;
pub mod store;
pub mod summary;
pub mod timestamp;
