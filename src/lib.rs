//! Reframe - A lightweight CBT thought-journaling backend
//!
//! This library provides the core functionality for the reframe backend.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
