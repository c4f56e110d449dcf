//! Generic CRUD service over a REST collection
//!
//! Every record type the backend exposes follows the same shape:
//! `GET {endpoint}` (paged, filtered), `GET {endpoint}/{id}`,
//! `POST {endpoint}`, `PUT {endpoint}/{id}` and `DELETE {endpoint}/{id}`.
//! [`ResourceService`] implements that once; each feature module adds its
//! own extra calls in an inherent `impl` block.

use crate::adapters::http::ApiClient;
use crate::domain::{Page, Result, Validate};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::fmt::{self, Display};
use std::marker::PhantomData;

/// A REST collection and its types
pub trait Resource {
    /// Collection path relative to the API base URL
    const ENDPOINT: &'static str;

    /// Record as returned by the backend
    type Record: DeserializeOwned + Send;

    /// Server-assigned identifier
    type Id: Display + Copy + Send + Sync;

    /// Create/update payload, validated before it is sent
    type Draft: Serialize + Validate + Sync;

    /// List query parameters
    type Filter: Serialize + Default + Sync;
}

/// CRUD calls for resource `R`
pub struct ResourceService<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<R: Resource> fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("endpoint", &R::ENDPOINT)
            .finish()
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    fn item_endpoint(id: R::Id) -> String {
        format!("{}/{}", R::ENDPOINT, id)
    }

    /// One page of records matching `filter`
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn list(&self, filter: &R::Filter) -> Result<Page<R::Record>> {
        Ok(self.api.get_with_query(R::ENDPOINT, filter).await?)
    }

    /// Record by id
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, otherwise the classified API error.
    pub async fn get(&self, id: R::Id) -> Result<R::Record> {
        Ok(self.api.get(&Self::item_endpoint(id)).await?)
    }

    /// Creates a record
    ///
    /// # Errors
    ///
    /// Returns a validation error without sending anything when the draft
    /// is incomplete, otherwise the classified API error.
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Record> {
        draft.validate_for_create()?;
        Ok(self.api.post(R::ENDPOINT, draft).await?)
    }

    /// Replaces a record
    ///
    /// # Errors
    ///
    /// Same as [`ResourceService::create`].
    pub async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<R::Record> {
        draft.validate()?;
        Ok(self.api.put(&Self::item_endpoint(id), draft).await?)
    }

    /// Deletes a record
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn delete(&self, id: R::Id) -> Result<()> {
        self.api
            .delete::<IgnoredAny>(&Self::item_endpoint(id))
            .await?;
        tracing::info!(endpoint = R::ENDPOINT, id = %id, "Record deleted");
        Ok(())
    }
}
