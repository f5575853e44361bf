//! HTTP handlers, one submodule per resource

pub mod health;
pub mod library;
pub mod rating;
pub mod reservation;

pub use health::health_check;
pub use library::{list_libraries, list_library_books};
pub use rating::get_rating;
pub use reservation::{list_reservations, reserve_book, return_book};
