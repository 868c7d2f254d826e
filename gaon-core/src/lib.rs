//! Core widgets for the Gaon school portal.
//!
//! This crate holds everything the portal front end does besides drawing:
//! - `calendar` for the scheduler widget (event store, school events,
//!   navigation, layouts, event form)
//! - `chat`, `profile` and `theme` for the smaller widgets
//! - `storage` for the key/value store the widgets persist into
//! - `client` for the portal backend API

pub mod calendar;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod profile;
pub mod storage;
pub mod theme;

pub use error::{GaonError, GaonResult};
