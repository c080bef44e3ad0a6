// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! the composition rules of the object model.

mod aggregation;
mod dispatch_order;
mod tag_algebra;
