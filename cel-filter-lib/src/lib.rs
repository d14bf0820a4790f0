#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for cel-filter
//!
//! This library evaluates ordered lists of CEL (Common Expression Language) policy expressions
//! against Kubernetes-style admission requests.
//!
//! # Module Organization
//!
//! - [`filter`]: Expression compilation and evaluation
//! - [`admission`]: Admission request attributes and the `request` variable's shape
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod admission;
pub mod commands;
pub mod filter;

pub use crate::commands::{Host, run};
