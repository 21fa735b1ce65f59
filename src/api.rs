use crate::cliente::{Cliente, ClienteForm};
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

pub const LIST_ERROR: &str = "Error al obtener todos los clientes";
pub const SAVE_ERROR: &str = "Error al guardar el cliente";
pub const DELETE_ERROR: &str = "Error al eliminar el cliente";

/// CRUD operations against the customer records store.
#[async_trait]
pub trait ClientesBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Cliente>>;
    async fn create(&self, form: &ClienteForm) -> Result<()>;
    async fn update(&self, id: &str, form: &ClienteForm) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// REST client for `/api/clientes`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(config.api_root())
            .map_err(|e| Error::Config(format!("invalid base_url {:?}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("base_url {:?} cannot be a base", config.base_url)));
        }
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(ApiClient { http, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new(), so segments are always available
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "clientes"]).extend(segments);
        }
        url
    }
}

/// Pass 2xx responses through; otherwise surface the body's `error` field,
/// falling back to `default_message`.
async fn check(resp: Response, default_message: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default_message.to_string());
    warn!(status = status.as_u16(), %message, "API request failed");
    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ClientesBackend for ApiClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Cliente>> {
        let url = self.endpoint(&[]);
        debug!(%url, "GET");
        let resp = check(self.http.get(url).send().await?, LIST_ERROR).await?;
        let clientes: Vec<Cliente> = resp.json().await?;
        debug!(count = clientes.len(), "fetched clientes");
        Ok(clientes)
    }

    #[instrument(skip(self, form))]
    async fn create(&self, form: &ClienteForm) -> Result<()> {
        let url = self.endpoint(&[]);
        debug!(%url, "POST");
        check(self.http.post(url).json(form).send().await?, SAVE_ERROR).await?;
        Ok(())
    }

    #[instrument(skip(self, form))]
    async fn update(&self, id: &str, form: &ClienteForm) -> Result<()> {
        let url = self.endpoint(&["update", id]);
        debug!(%url, "PUT");
        check(self.http.put(url).json(form).send().await?, SAVE_ERROR).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["delete", id]);
        debug!(%url, "DELETE");
        check(self.http.delete(url).send().await?, DELETE_ERROR).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = Config {
            base_url: base.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let c = client("http://localhost:2000");
        assert_eq!(c.endpoint(&[]).as_str(), "http://localhost:2000/api/clientes");
        assert_eq!(
            c.endpoint(&["update", "abc"]).as_str(),
            "http://localhost:2000/api/clientes/update/abc"
        );
        assert_eq!(
            c.endpoint(&["delete", "abc"]).as_str(),
            "http://localhost:2000/api/clientes/delete/abc"
        );
    }

    #[test]
    fn test_endpoint_under_prefix() {
        let c = client("http://host/v1/");
        assert_eq!(c.endpoint(&[]).as_str(), "http://host/v1/api/clientes");
    }

    #[test]
    fn test_id_is_escaped() {
        let c = client("http://localhost:2000");
        assert_eq!(
            c.endpoint(&["delete", "a/b c"]).as_str(),
            "http://localhost:2000/api/clientes/delete/a%2Fb%20c"
        );
    }
}
