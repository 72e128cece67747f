//! Shared test harness modules for the SmartRural CLI.

use super::*;

mod helpers;
mod route_unit;
mod sites_unit;
