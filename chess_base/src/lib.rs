//! # Base types for varchess
//!
//! This is an auxiliary crate for `varchess`, which contains the plain value types shared between
//! the rules engine and a presentation layer: colors, piece kinds, cell coordinates, notation squares
//! and per-cell tables. It was split from the main crate, so a front-end can depend on it without
//! pulling the engine in.
//!
//! Normally you don't want to use this crate directly. Use `varchess` instead.

pub mod cellset;
pub mod geometry;
pub mod types;
