//! Shared test harness modules for the Journeo CLI.

use super::*;

mod helpers;
