//! Per-module function tests.

mod aggregates;
mod dates;
mod workdays;
