//! Request/response transport.
//!
//! [`Transport`] is the seam between the typed admin services and the wire:
//! a service hands over a request body and gets back the response body, or
//! an error carrying the server's fault. [`HttpTransport`] is the production
//! implementation; tests substitute their own.

use std::future::Future;

use crate::config::Config;
use crate::element::Element;
use crate::envelope::{Envelope, SOAP_CONTENT_TYPE, admin_request, parse_response};
use crate::error::{Error, Result};

/// Longest response body kept in [`Error::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Sends one admin request and returns the response body element.
pub trait Transport: Send + Sync {
    /// Sends `request` (e.g. `<GetAccountRequest>`) and returns the response
    /// body content (e.g. `<GetAccountResponse>`).
    ///
    /// Server faults are returned as [`Error::Fault`]; use
    /// [`Error::is_not_found`] to tell a missing entity from other faults.
    fn invoke(&self, request: Element) -> impl Future<Output = Result<Element>> + Send;
}

/// Authenticated HTTP(S) transport for the admin SOAP endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    auth_token: String,
}

impl HttpTransport {
    /// Connects to the endpoint and authenticates with the configured admin credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the server rejects the credentials or
    /// returns no token, or a transport error if the request fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        let endpoint = config.endpoint();

        let mut request = admin_request("AuthRequest");
        request.add("name", config.admin_name.as_str());
        request.add("password", config.admin_password.as_str());

        tracing::debug!(endpoint = %endpoint, admin = %config.admin_name, "Authenticating");
        let response = post(&client, &endpoint, &Envelope::new(request))
            .await
            .map_err(|e| match e {
                Error::Fault(fault) => Error::Auth(fault.to_string()),
                other => other,
            })?;

        let auth_token = response
            .child("authToken")
            .and_then(Element::text)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Auth("AuthResponse carried no authToken".to_string()))?
            .to_string();

        tracing::info!(endpoint = %endpoint, admin = %config.admin_name, "Authenticated");
        Ok(Self {
            client,
            endpoint,
            auth_token,
        })
    }

    /// Returns the SOAP endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the session auth token.
    #[must_use]
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

impl Transport for HttpTransport {
    async fn invoke(&self, request: Element) -> Result<Element> {
        let envelope = Envelope::new(request).with_auth_token(self.auth_token.as_str());
        post(&self.client, &self.endpoint, &envelope).await
    }
}

async fn post(client: &reqwest::Client, endpoint: &str, envelope: &Envelope) -> Result<Element> {
    let operation = envelope.body().local_name().to_string();
    let payload = envelope.to_xml()?;
    tracing::debug!(operation = %operation, bytes = payload.len(), "Sending request");

    let response = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, SOAP_CONTENT_TYPE)
        .body(payload)
        .send()
        .await?;
    let status = response.status();
    let text = response.text().await?;

    // Faults arrive with HTTP 500, so the body is decoded before the status is judged.
    match parse_response(&text) {
        Ok(body) => {
            tracing::debug!(operation = %operation, response = body.local_name(), "Received response");
            Ok(body)
        }
        Err(Error::Fault(fault)) => {
            tracing::warn!(operation = %operation, %fault, "Server returned fault");
            Err(Error::Fault(fault))
        }
        Err(Error::Parse { .. }) if !status.is_success() => Err(Error::Status {
            status: status.as_u16(),
            body: text.chars().take(MAX_ERROR_BODY).collect(),
        }),
        Err(e) => Err(e),
    }
}
