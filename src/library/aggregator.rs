//! Response Aggregator
//!
//! Joins reservations with their book and library using one batched lookup
//! per entity type.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::types::{Book, Library, Reservation, ReservationDetails};
use crate::clients::{CatalogClient, ClientError};

/// Distinct values in first-seen order
fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Attach book and library metadata, preserving the input order.
///
/// An id the catalog does not return degrades to a default entity.
pub async fn aggregate(
    catalog: &dyn CatalogClient,
    reservations: Vec<Reservation>,
) -> Result<Vec<ReservationDetails>, ClientError> {
    if reservations.is_empty() {
        return Ok(Vec::new());
    }

    let book_uids = distinct(reservations.iter().map(|r| r.book_uid.as_str()));
    let library_uids = distinct(reservations.iter().map(|r| r.library_uid.as_str()));

    let books: HashMap<String, Book> = catalog
        .books_by_uids(&book_uids)
        .await?
        .into_iter()
        .map(|b| (b.book_uid.clone(), b))
        .collect();
    let libraries: HashMap<String, Library> = catalog
        .libraries_by_uids(&library_uids)
        .await?
        .into_iter()
        .map(|l| (l.library_uid.clone(), l))
        .collect();

    Ok(reservations
        .into_iter()
        .map(|reservation| {
            let book = books.get(&reservation.book_uid).cloned().unwrap_or_else(|| {
                warn!(book_uid = %reservation.book_uid, "book missing from catalog");
                Book::default()
            });
            let library = libraries
                .get(&reservation.library_uid)
                .cloned()
                .unwrap_or_else(|| {
                    warn!(library_uid = %reservation.library_uid, "library missing from catalog");
                    Library::default()
                });
            ReservationDetails::new(reservation, book, library)
        })
        .collect())
}
