//! identity-gateway - an HTTP service for identity and event records
//!
//! This crate provides a small HTTP service that exposes identity and event
//! records behind a pluggable authentication layer: a basic-auth gate on
//! every route, JWT issuance and validation, and a request pipeline with
//! correlation ids, access logging, and panic recovery.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod identity;
pub mod logging;
pub mod models;
pub mod server;
