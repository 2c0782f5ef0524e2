use log::debug;
use serde::de::DeserializeOwned;

use super::core::GitLabClient;
use crate::error::Result;

const PAGE_SIZE: usize = 100;
const NEXT_PAGE_HEADER: &str = "x-next-page";

impl GitLabClient {
    /// Walks an offset-paginated collection and returns every record, in page order.
    ///
    /// `per_page` and `page` are appended to `params`. The walk stops on the
    /// first page that either has no `x-next-page` hint or holds fewer than
    /// [`PAGE_SIZE`] records. Any non-2xx page or malformed body aborts the
    /// walk; nothing is retried.
    pub async fn fetch_paginated<T>(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut records = Vec::new();
        let mut page: u64 = 1;

        loop {
            let mut query: Vec<(&str, String)> = params.to_vec();
            query.push(("per_page", PAGE_SIZE.to_string()));
            query.push(("page", page.to_string()));

            let response = self.get(url.clone(), &query).await?;

            let next_page = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned);

            let body = response.bytes().await?;
            let items: Vec<T> = serde_json::from_slice(&body)?;
            let fetched = items.len();
            records.extend(items);

            debug!("{path}: page {page} returned {fetched} records");

            let Some(next_page) = next_page else {
                break;
            };
            if fetched < PAGE_SIZE {
                break;
            }

            page = next_page.parse().unwrap_or(page + 1);
        }

        Ok(records)
    }
}
