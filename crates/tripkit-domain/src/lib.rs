//! tripkit-domain
//!
//! Pure domain models (Trip, ItineraryEvent, PackingItem, Expense, weather
//! series, etc.). No I/O, no business logic. Only data types and core enums.

pub mod common;
pub mod expense;
pub mod itinerary;
pub mod member;
pub mod packing;
pub mod trip;
pub mod weather;

pub use common::*;
pub use expense::*;
pub use itinerary::*;
pub use member::*;
pub use packing::*;
pub use trip::*;
pub use weather::*;
