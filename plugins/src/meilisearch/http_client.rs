use meiliscout_core::api as core_api;
use serde::de::DeserializeOwned;
use std::{error::Error as StdError, fmt};

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeiliHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Unknown,
}

impl MeiliHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MeiliHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct MeiliHttpError {
    kind: MeiliHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl MeiliHttpError {
    pub fn kind(&self) -> MeiliHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            MeiliHttpErrorKind::Timeout
        } else if err.is_connect() {
            MeiliHttpErrorKind::Connect
        } else if err.is_request() {
            MeiliHttpErrorKind::Request
        } else if err.is_body() {
            MeiliHttpErrorKind::Body
        } else if err.is_decode() {
            MeiliHttpErrorKind::Decode
        } else {
            MeiliHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        MeiliHttpError {
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn status_error(status: u16, url: String, preview: String) -> Self {
        MeiliHttpError {
            kind: MeiliHttpErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: preview,
            source: None,
        }
    }

    fn decode_error(status: u16, url: String, err: serde_json::Error, preview: String) -> Self {
        let message = format!("failed to decode response body: {} | body={}", err, preview);
        MeiliHttpError {
            kind: MeiliHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl fmt::Display for MeiliHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meilisearch http error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for MeiliHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

async fn parse_json_response<T: DeserializeOwned>(resp: reqwest::Response) -> anyhow::Result<T> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| MeiliHttpError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(MeiliHttpError::status_error(status.as_u16(), url, preview).into());
    }

    serde_json::from_str::<T>(&body).map_err(|err| {
        let preview = preview_body(&body);
        MeiliHttpError::decode_error(status.as_u16(), url, err, preview).into()
    })
}

/// Settings sub-route for one attribute category.
pub fn settings_route(category: core_api::AttributeCategory) -> &'static str {
    match category {
        core_api::AttributeCategory::Searchable => "searchable-attributes",
        core_api::AttributeCategory::Displayable => "displayed-attributes",
        core_api::AttributeCategory::Filterable => "filterable-attributes",
        core_api::AttributeCategory::Sortable => "sortable-attributes",
    }
}

#[derive(Clone)]
pub struct HttpClient {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: String, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            api_key,
            http,
            base_url: normalized,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    /// `PUT /indexes/{uid}/settings/{route}` with the field list as body.
    pub async fn update_settings(
        &self,
        index_uid: &str,
        category: core_api::AttributeCategory,
        fields: &[String],
    ) -> anyhow::Result<core_api::TaskInfo> {
        let url = format!(
            "{}/indexes/{}/settings/{}",
            self.base_url,
            index_uid,
            settings_route(category)
        );
        tracing::debug!(
            target: "meiliscout.http",
            stage = "meili.http.settings.in",
            url = %url,
            category = %category,
            fields = fields.len()
        );
        let req = self.http.put(&url).json(fields);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| MeiliHttpError::from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let info: core_api::TaskInfo = parse_json_response(resp).await?;
        tracing::debug!(
            target: "meiliscout.http",
            stage = "meili.http.settings.out",
            status = %status,
            task_uid = ?info.task_uid
        );
        Ok(info)
    }

    /// `GET /tasks/{uid}`.
    pub async fn get_task(&self, task_uid: core_api::TaskUid) -> anyhow::Result<core_api::Task> {
        let url = format!("{}/tasks/{}", self.base_url, task_uid);
        tracing::trace!(target: "meiliscout.http", stage = "meili.http.task.in", url = %url);
        let req = self.http.get(&url);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| MeiliHttpError::from_reqwest(err, url.clone()))?;
        let task: core_api::Task = parse_json_response(resp).await?;
        tracing::trace!(
            target: "meiliscout.http",
            stage = "meili.http.task.out",
            task_uid = task.uid,
            status = %task.status
        );
        Ok(task)
    }
}
