// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # mathplot
//! Plots one or more formulas of `x` given as text, for example `x^2; sin(x)`.
//!
//! - [`symbolic`]: parses a formula into a symbolic expression and turns it into a Rust closure
//! - [`plotting`]: validates the form, samples the formulas and draws the figure with plotters
//! - [`Utils`]: logging, curve export and form documents
pub mod Utils;
pub mod plotting;
pub mod symbolic;
