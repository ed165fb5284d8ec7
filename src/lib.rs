#![doc = "wp-translation-strings: translation string generation from a content API."]

//! This crate fetches allow-listed taxonomy terms and post titles from a
//! WordPress-style REST API and renders them as `_x()` translation markers,
//! ready for import into a string catalog.
//!
//! # Usage
//! The binary drives the whole pipeline; the library exposes the fetch,
//! render and orchestration modules so tests (and other tools) can run the
//! pipeline against a mock transport.

pub mod cli;
pub mod config;
pub mod contract;
pub mod fetch;
pub mod generate;
pub mod load_config;
pub mod render;
