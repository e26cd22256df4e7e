#![deny(missing_docs)]
//! Hangar core library.
//!
//! This crate contains the ship domain types together with the validation,
//! rating, filtering, sorting and pagination rules shared by the server and
//! the CLI.

pub mod domain;
pub mod error;
pub mod filter;
pub mod merge;
pub mod pagination;
pub mod rating;
pub mod service;
pub mod sort;
pub mod store;
pub mod validator;

pub use domain::{NewShip, Ship, ShipCriteria, ShipDraft, ShipOrder, ShipType, ShipUpdate};
pub use error::{HangarError, Result};
pub use filter::filter_ships;
pub use merge::{affects_rating, apply_update, prepare_new_ship};
pub use pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, paginate};
pub use rating::{DEFAULT_CURRENT_YEAR, RatingConfig, calculate_rating, round2};
pub use service::ShipService;
pub use sort::sort_ships;
pub use store::{InMemoryShipStore, ShipStore};
pub use validator::{
    is_crew_size_valid, is_prod_date_valid, is_speed_valid, is_string_valid, is_valid_ship,
    validate_new_ship,
};
