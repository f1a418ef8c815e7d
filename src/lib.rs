//! Falling & Catch Library
//!
//! This library provides the server side of the Falling & Catch early-learning
//! game: the mode and level catalogs, resolution of a selection into a round
//! configuration, and the web pages and API that hand it to the browser.

// Module declarations
pub mod catalog;
pub mod config;
pub mod constants;
pub mod resolver;
pub mod web;
