//! This module provides a client for a remote `/tasks` REST resource

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::error::Error;
use crate::filter::TaskFilter;
use crate::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::traits::TaskSource;

/// A [`TaskSource`] that fetches its data from a remote REST resource
pub struct RestClient {
    /// The URL of the tasks resource itself (e.g. `https://example.org/api/tasks`)
    endpoint: Url,
    http: reqwest::Client,
}

impl RestClient {
    /// Create a client. This does not contact the server.
    ///
    /// `endpoint` is the URL of the tasks resource itself, e.g. `https://example.org/api/tasks`.
    pub fn new<S: AsRef<str>>(endpoint: S) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint.as_ref())
            .map_err(|err| Error::InvalidRequest(format!("invalid endpoint URL: {}", err)))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn invalid_request(response: reqwest::Response) -> Error {
        let details = response.text().await.unwrap_or_default();
        Error::InvalidRequest(details)
    }
}

#[async_trait]
impl TaskSource for RestClient {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, Error> {
        let mut url = self.endpoint.clone();
        let query = filter.to_query();
        if query.is_empty() == false {
            url.query_pairs_mut().extend_pairs(query);
        }

        log::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let tasks = response.error_for_status()?.json().await?;
        Ok(tasks)
    }

    async fn create_task(&mut self, draft: TaskDraft) -> Result<Task, Error> {
        log::debug!("POST {} ({})", self.endpoint, draft.title);
        let response = self.http.post(self.endpoint.clone()).json(&draft).send().await?;
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(Self::invalid_request(response).await);
        }
        let task = response.error_for_status()?.json().await?;
        Ok(task)
    }

    async fn update_task(&mut self, patch: TaskPatch) -> Result<Task, Error> {
        log::debug!("PUT {} (task {})", self.endpoint, patch.id);
        let response = self.http.put(self.endpoint.clone()).json(&patch).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(patch.id)),
            StatusCode::BAD_REQUEST => Err(Self::invalid_request(response).await),
            _ => {
                let task = response.error_for_status()?.json().await?;
                Ok(task)
            },
        }
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Error> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("id", id.as_str());

        log::debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id.clone()));
        }
        response.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_urls_carry_the_filter_as_query_parameters() {
        let client = RestClient::new("http://localhost:3000/api/tasks").unwrap();
        let mut url = client.endpoint().clone();

        let mut filter = TaskFilter::new();
        filter.category = Some(crate::task::Category::Work);
        filter.time_range = Some(crate::filter::TimeRange::Afternoon);
        url.query_pairs_mut().extend_pairs(filter.to_query());

        assert_eq!(url.as_str(), "http://localhost:3000/api/tasks?category=work&timeRange=afternoon");
    }

    #[test]
    fn garbage_endpoints_are_refused() {
        assert!(matches!(RestClient::new("not a url"), Err(Error::InvalidRequest(_))));
    }
}
