//! Quotecast Core: indicators, forecast projector, quote providers.
//!
//! This crate contains everything except the user interfaces:
//! - Indicator calculator (returns, volatility, RSI, SMA, momentum, correlation)
//! - Forecast projector over a frozen indicator snapshot with injected noise
//! - Quote providers (Yahoo Finance, synthetic) and response validation
//! - TOML configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod indicators;
pub mod rng;
