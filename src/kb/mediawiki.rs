//! MediaWiki Action API knowledge-base client.
//!
//! Backs [`KnowledgeBaseClient`] with a MediaWiki installation (e.g.
//! Wikipedia): topics are articles, categories are the wiki's category
//! pages, and a user's interests are the distinct main-namespace
//! articles the user has non-trivially edited.
//!
//! Uses `reqwest` for HTTP and `backoff` for exponential-backoff retry
//! on transient failures, so the graph-building core never needs retry
//! logic of its own.

use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{KbError, Result};
use crate::kb::KnowledgeBaseClient;

/// Cap on how many edited pages count toward a user's interest profile.
/// Prolific editors would otherwise trigger thousands of description
/// lookups downstream.
const DEFAULT_MAX_INTEREST_PAGES: usize = 100;

/// MediaWiki-backed [`KnowledgeBaseClient`].
pub struct MediaWikiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    max_interest_pages: usize,
}

impl MediaWikiClient {
    /// Create a client against the given Action API endpoint
    /// (e.g. `https://en.wikipedia.org/w/api.php`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
            max_interest_pages: DEFAULT_MAX_INTEREST_PAGES,
        }
    }

    /// Override the interest-page cap (default 100).
    pub fn with_max_interest_pages(mut self, max: usize) -> Self {
        self.max_interest_pages = max;
        self
    }

    /// Issue one API query with exponential-backoff retry.
    ///
    /// Retries on network-level failures, HTTP 429 and 5xx; everything
    /// else is permanent (initial 500 ms, cap 10 s, total budget 60 s).
    fn get_json(&self, params: &[(String, String)]) -> Result<Value> {
        let backoff_policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(500))
            .with_max_interval(Duration::from_secs(10))
            .with_max_elapsed_time(Some(Duration::from_secs(60)))
            .build();

        let value = backoff::retry(backoff_policy, || {
            let response = self
                .http
                .get(&self.endpoint)
                .query(params)
                .send()
                .map_err(|e| {
                    if e.is_timeout() || e.is_connect() {
                        warn!(error = %e, "transient network failure — retrying");
                        backoff::Error::transient(KbError::Network(e.to_string()))
                    } else {
                        backoff::Error::permanent(KbError::Network(e.to_string()))
                    }
                })?;

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                warn!(status = status.as_u16(), "transient API error — retrying");
                return Err(backoff::Error::transient(KbError::Api {
                    status: status.as_u16(),
                    message: status.to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(KbError::Api {
                    status: status.as_u16(),
                    message: status.to_string(),
                }));
            }

            response.json::<Value>().map_err(|e| {
                backoff::Error::permanent(KbError::MalformedResponse(e.to_string()))
            })
        })
        .map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        })?;

        Ok(value)
    }

    fn base_params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut params = vec![
            ("action".to_string(), "query".to_string()),
            ("format".to_string(), "json".to_string()),
            ("formatversion".to_string(), "2".to_string()),
        ];
        params.extend(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        params
    }
}

impl KnowledgeBaseClient for MediaWikiClient {
    /// Distinct main-namespace article titles the user has non-trivially
    /// edited, in recency order, capped at `max_interest_pages`.
    fn user_interests(&self, user_id: &str) -> Result<Vec<String>> {
        let mut titles: Vec<String> = Vec::new();
        let mut continuation: Option<Vec<(String, String)>> = None;

        loop {
            let mut params = Self::base_params(&[
                ("list", "usercontribs"),
                ("ucuser", user_id),
                ("ucnamespace", "0"),
                ("ucshow", "!minor"),
                ("uclimit", "500"),
            ]);
            if let Some(more) = continuation.take() {
                params.extend(more);
            }

            let value = self.get_json(&params)?;
            for title in parse_contrib_titles(&value)? {
                if titles.len() >= self.max_interest_pages {
                    debug!(user = user_id, "interest-page cap reached");
                    return Ok(titles);
                }
                if !titles.contains(&title) {
                    titles.push(title);
                }
            }

            match continuation_params(&value) {
                Some(more) => continuation = Some(more),
                None => break,
            }
        }

        Ok(titles)
    }

    /// Plain-text extract of the article, following redirects. Returns
    /// an empty string when the page has no usable extract; the graph
    /// builder substitutes the title in that case.
    fn description(&self, topic_title: &str) -> Result<String> {
        let title = strip_anchor(topic_title);
        let params = Self::base_params(&[
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
        ]);

        let value = self.get_json(&params)?;
        Ok(parse_extract(&value).unwrap_or_default())
    }

    /// Titles of the page's non-hidden categories, following API
    /// continuation until exhausted.
    fn parent_categories(&self, title: &str) -> Result<Vec<String>> {
        let title = strip_anchor(title);
        let mut categories: Vec<String> = Vec::new();
        let mut continuation: Option<Vec<(String, String)>> = None;

        loop {
            let mut params = Self::base_params(&[
                ("prop", "categories"),
                ("clshow", "!hidden"),
                ("cllimit", "max"),
                ("redirects", "1"),
                ("titles", title),
            ]);
            if let Some(more) = continuation.take() {
                params.extend(more);
            }

            let value = self.get_json(&params)?;
            for category in parse_category_titles(&value)? {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }

            match continuation_params(&value) {
                Some(more) => continuation = Some(more),
                None => break,
            }
        }

        Ok(categories)
    }
}

/// Drop a `#Section` anchor from a title (`"Microbrewery#Craft beer"`
/// refers to the `Microbrewery` page).
fn strip_anchor(title: &str) -> &str {
    title.split('#').next().unwrap_or(title)
}

/// First page object of a `query.pages` response, if any.
fn first_page(value: &Value) -> Option<&Value> {
    value.get("query")?.get("pages")?.as_array()?.first()
}

/// Extract text of the first page in an extracts response.
fn parse_extract(value: &Value) -> Option<String> {
    let page = first_page(value)?;
    if page.get("missing").is_some_and(|m| m.as_bool() == Some(true)) {
        return None;
    }
    page.get("extract")?.as_str().map(str::to_string)
}

/// Category titles of the first page in a categories response. A page
/// without a `categories` field (uncategorized or missing) yields an
/// empty list.
fn parse_category_titles(value: &Value) -> Result<Vec<String>> {
    let Some(page) = first_page(value) else {
        return Err(KbError::MalformedResponse("no pages in response".to_string()).into());
    };

    let Some(categories) = page.get("categories").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    Ok(categories
        .iter()
        .filter_map(|c| c.get("title").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

/// Page titles in a usercontribs response.
fn parse_contrib_titles(value: &Value) -> Result<Vec<String>> {
    let Some(contribs) = value
        .get("query")
        .and_then(|q| q.get("usercontribs"))
        .and_then(Value::as_array)
    else {
        return Err(KbError::MalformedResponse("no usercontribs in response".to_string()).into());
    };

    Ok(contribs
        .iter()
        .filter_map(|c| c.get("title").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

/// Continuation parameters to append to the next request, or `None`
/// when the result set is exhausted.
fn continuation_params(value: &Value) -> Option<Vec<(String, String)>> {
    let object = value.get("continue")?.as_object()?;
    Some(
        object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
    )
}
