//! Catalog (library/book inventory) service client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::CatalogClient;
use super::error::ClientError;
use super::http::{RawResponse, ServiceEndpoint};
use crate::library::types::{Book, LibrariesQuery, Library, LibraryBooksQuery};

pub const SERVICE: &str = "library";

/// Envelope of the batch lookup endpoints
#[derive(Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

pub struct HttpCatalogClient {
    endpoint: ServiceEndpoint,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, client: Client, max_in_flight: usize) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: ServiceEndpoint::new(SERVICE, base_url, client, max_in_flight)?,
        })
    }
}

/// `[("bookUids", a), ("bookUids", b), ...]`, encoded as a repeated param
fn repeated<'a>(name: &'a str, values: &'a [String]) -> Vec<(&'a str, &'a str)> {
    values.iter().map(|v| (name, v.as_str())).collect()
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn books_by_uids(&self, book_uids: &[String]) -> Result<Vec<Book>, ClientError> {
        let request = self
            .endpoint
            .get(&["books", ""])
            .query(&repeated("bookUids", book_uids));
        let envelope: DataEnvelope<Book> = self.endpoint.send_json(request).await?;
        Ok(envelope.data)
    }

    async fn libraries_by_uids(
        &self,
        library_uids: &[String],
    ) -> Result<Vec<Library>, ClientError> {
        let request = self
            .endpoint
            .get(&["libraries", "by-uids"])
            .query(&repeated("libraryUids", library_uids));
        let envelope: DataEnvelope<Library> = self.endpoint.send_json(request).await?;
        Ok(envelope.data)
    }

    async fn update_available_count(
        &self,
        library_uid: &str,
        book_uid: &str,
        count_diff: i32,
    ) -> Result<(), ClientError> {
        let request = self
            .endpoint
            .put(&["libraries", library_uid, "books", book_uid])
            .query(&[("countDiff", count_diff)]);
        self.endpoint.send_ok(request).await.map(|_| ())
    }

    async fn list_libraries(&self, query: &LibrariesQuery) -> Result<RawResponse, ClientError> {
        let request = self.endpoint.get(&["libraries"]).query(query);
        self.endpoint.send(request).await
    }

    async fn list_library_books(
        &self,
        library_uid: &str,
        query: &LibraryBooksQuery,
    ) -> Result<RawResponse, ClientError> {
        let request = self
            .endpoint
            .get(&["libraries", library_uid, "books"])
            .query(query);
        self.endpoint.send(request).await
    }
}
