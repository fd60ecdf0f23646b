//! HTTP client wrapper for the memegen API.

use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode, Url};
use serde_json::Value;

use crate::config::get_config;
use crate::memegen::{
    TemplateCatalog,
    types::{MemegenError, Template},
};

const LIST_CONTEXT: &str = "templates from memegen API";

/// Lightweight HTTP client for memegen template lookups.
#[derive(Clone)]
pub struct MemegenClient {
    client: Client,
    base_url: Url,
}

impl MemegenClient {
    /// Construct a client using the configured upstream base URL.
    pub fn new() -> Result<Self, MemegenError> {
        Self::with_base_url(&get_config().api_base_url)
    }

    /// Construct a client against an explicit base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, MemegenError> {
        let client = Client::builder()
            .user_agent(concat!("memegen-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| MemegenError::Http {
                context: "HTTP client".into(),
                source,
            })?;
        let base_url = normalize_base_url(base_url).map_err(MemegenError::InvalidUrl)?;
        tracing::debug!(url = %base_url, "Initialized memegen HTTP client");

        Ok(Self { client, base_url })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Fetch templates, letting memegen apply the optional `filter` and `animated` constraints.
    pub async fn list_templates(
        &self,
        filter: Option<&str>,
        animated: Option<bool>,
    ) -> Result<Vec<Template>, MemegenError> {
        let request = self.list_request(filter, animated)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| http_error(LIST_CONTEXT, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = MemegenError::UnexpectedStatus {
                context: LIST_CONTEXT.into(),
                status,
                body,
            };
            tracing::error!(error = %error, "Failed to list templates");
            return Err(error);
        }

        let templates: Vec<Template> = response
            .json()
            .await
            .map_err(|source| http_error(LIST_CONTEXT, source))?;
        tracing::debug!(count = templates.len(), "Fetched templates");
        Ok(templates)
    }

    /// Fetch a single template document, returning `None` when memegen does not know the id.
    ///
    /// The body is decoded as plain JSON so callers see every field, `null`s included.
    pub async fn get_template(&self, template_id: &str) -> Result<Option<Value>, MemegenError> {
        let context = format!("template '{template_id}' from memegen API");

        let url = self.endpoint(&["templates", template_id])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| http_error(&context, source))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(template_id, "Template not found");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = MemegenError::UnexpectedStatus {
                context,
                status,
                body,
            };
            tracing::error!(template_id, error = %error, "Failed to get template");
            return Err(error);
        }

        let template: Value = response
            .json()
            .await
            .map_err(|source| http_error(&context, source))?;
        Ok(Some(template))
    }

    /// `GET /templates`, carrying `filter` only when non-empty and `animated` only when set.
    fn list_request(
        &self,
        filter: Option<&str>,
        animated: Option<bool>,
    ) -> Result<Request, MemegenError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(filter) = filter.filter(|value| !value.is_empty()) {
            query.push(("filter", filter.to_string()));
        }
        if let Some(animated) = animated {
            query.push(("animated", animated.to_string()));
        }

        self.client
            .get(self.endpoint(&["templates"])?)
            .query(&query)
            .build()
            .map_err(|source| http_error(LIST_CONTEXT, source))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, MemegenError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MemegenError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl TemplateCatalog for MemegenClient {
    async fn list_templates(
        &self,
        filter: Option<&str>,
        animated: Option<bool>,
    ) -> Result<Vec<Template>, MemegenError> {
        MemegenClient::list_templates(self, filter, animated).await
    }

    async fn get_template(&self, template_id: &str) -> Result<Option<Value>, MemegenError> {
        MemegenClient::get_template(self, template_id).await
    }
}

fn http_error(context: &str, source: reqwest::Error) -> MemegenError {
    tracing::error!(context, error = %source, "memegen request failed");
    MemegenError::Http {
        context: context.to_string(),
        source,
    }
}

fn normalize_base_url(url: &str) -> Result<Url, String> {
    let mut parsed = Url::parse(url).map_err(|err| err.to_string())?;
    if parsed.cannot_be_a_base() {
        return Err(format!("{url} cannot be used as a base URL"));
    }
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn client_for(server: &MockServer) -> MemegenClient {
        MemegenClient::with_base_url(&server.base_url()).expect("client")
    }

    #[tokio::test]
    async fn list_templates_forwards_filters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/templates")
                    .query_param("filter", "cat")
                    .query_param("animated", "true");
                then.status(200).json_body(json!([
                    {
                        "id": "grumpycat",
                        "name": "Grumpy Cat",
                        "blank": "https://api.memegen.link/images/grumpycat.png"
                    }
                ]));
            })
            .await;

        let templates = client_for(&server)
            .list_templates(Some("cat"), Some(true))
            .await
            .expect("list templates");

        mock.assert_async().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "grumpycat");
    }

    #[tokio::test]
    async fn get_template_maps_not_found_to_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/templates/nope");
                then.status(404).json_body(json!({ "error": "not found" }));
            })
            .await;

        let template = client_for(&server)
            .get_template("nope")
            .await
            .expect("404 is not a failure");
        assert!(template.is_none());
    }

    #[tokio::test]
    async fn get_template_returns_upstream_document() {
        let document = json!({
            "id": "drake",
            "lines": 2,
            "blank": "https://api.memegen.link/images/drake.png",
            "source": null,
            "_self": "https://api.memegen.link/templates/drake"
        });
        let server = MockServer::start_async().await;
        let body = document.clone();
        server
            .mock_async(move |when, then| {
                when.method(GET).path("/templates/drake");
                then.status(200).json_body(body);
            })
            .await;

        let template = client_for(&server)
            .get_template("drake")
            .await
            .expect("fetch")
            .expect("template present");
        assert_eq!(template, document);
    }

    #[test]
    fn unfiltered_listing_sends_no_query() {
        let client = MemegenClient::with_base_url("https://api.memegen.link").expect("client");

        let request = client.list_request(None, None).expect("request");
        assert_eq!(request.url().as_str(), "https://api.memegen.link/templates");
        assert_eq!(request.url().query(), None);

        let request = client.list_request(Some(""), None).expect("request");
        assert_eq!(request.url().query(), None);

        let request = client
            .list_request(Some("two buttons"), Some(false))
            .expect("request");
        assert_eq!(
            request.url().query(),
            Some("filter=two+buttons&animated=false")
        );
    }

    #[tokio::test]
    async fn connection_failures_surface_as_http_errors() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let client = MemegenClient::with_base_url(&format!("http://127.0.0.1:{port}"))
            .expect("client");

        let err = client
            .list_templates(None, None)
            .await
            .expect_err("nothing listens on the port");
        assert!(matches!(err, MemegenError::Http { .. }), "{err:?}");
        assert!(err.to_string().starts_with("Failed to fetch templates"));

        let err = client
            .get_template("drake")
            .await
            .expect_err("nothing listens on the port");
        assert!(matches!(err, MemegenError::Http { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn server_errors_surface_as_failures() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/templates/drake");
                then.status(500).body("boom");
            })
            .await;

        let err = client_for(&server)
            .get_template("drake")
            .await
            .expect_err("500 must fail");
        match err {
            MemegenError::UnexpectedStatus { status, body, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = MemegenClient::with_base_url("https://api.memegen.link/").expect("client");
        assert_eq!(client.base_url(), "https://api.memegen.link");
        let url = client.endpoint(&["templates", "drake"]).expect("endpoint");
        assert_eq!(url.as_str(), "https://api.memegen.link/templates/drake");
        let url = client.endpoint(&["templates", "a/b"]).expect("endpoint");
        assert_eq!(url.as_str(), "https://api.memegen.link/templates/a%2Fb");
        assert!(MemegenClient::with_base_url("mailto:someone@example.com").is_err());
    }
}
