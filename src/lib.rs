//! Payroll lifecycle engine
//!
//! This crate generates, approves, pays and cancels monthly payroll runs,
//! keeping every run consistent with the general ledger its salaries are
//! posted to.
//!
//! The [`orchestrator`] drives the lifecycle over three collaborators: a
//! [`repository`] of runs and items, a [`salary`] record store, and a
//! [`ledger`] gateway. The [`api`] module exposes the lifecycle over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod orchestrator;
pub mod reporting;
pub mod repository;
pub mod salary;
