// File: crates/clinic_gcal/src/auth.rs
use clinic_config::GcalConfig;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{
        read_application_secret, read_service_account_key, InstalledFlowAuthenticator,
        InstalledFlowReturnMethod, ServiceAccountAuthenticator,
    },
    CalendarHub,
};
use std::{error::Error, path::Path};
use tracing::info;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Which credentials a [`GcalConfig`] points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource<'a> {
    /// Service account key file
    ServiceAccount { key_path: &'a str },
    /// Desktop OAuth client; the consent screen runs once and the token is cached
    InstalledApp {
        credentials_path: &'a str,
        token_path: &'a str,
    },
}

/// A service account key wins over an OAuth client when both are configured.
pub fn credential_source(config: &GcalConfig) -> Result<CredentialSource<'_>, String> {
    if let Some(key_path) = config.key_path.as_deref() {
        return Ok(CredentialSource::ServiceAccount { key_path });
    }
    if let Some(credentials_path) = config.credentials_path.as_deref() {
        return Ok(CredentialSource::InstalledApp {
            credentials_path,
            token_path: config.token_path_or_default(),
        });
    }
    Err("GcalConfig needs key_path (service account) or credentials_path (OAuth client). \
         Create an OAuth Client ID (Desktop app) and save it as credentials.json."
        .to_string())
}

pub async fn create_calendar_hub(
    config: &GcalConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let source = credential_source(config)?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = match source {
        CredentialSource::ServiceAccount { key_path } => {
            info!("Authenticating to Google Calendar with service account key");
            let sa_key = read_service_account_key(Path::new(key_path)).await?;
            let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;
            CalendarHub::new(client, auth)
        }
        CredentialSource::InstalledApp {
            credentials_path,
            token_path,
        } => {
            if !Path::new(credentials_path).exists() {
                return Err(format!(
                    "{} not found. Create an OAuth Client ID (Desktop app), download the JSON and save it there.",
                    credentials_path
                )
                .into());
            }
            info!(
                "Authenticating to Google Calendar with OAuth client, token cache {}",
                token_path
            );
            let secret = read_application_secret(Path::new(credentials_path)).await?;
            let auth =
                InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
                    .persist_tokens_to_disk(token_path)
                    .build()
                    .await?;
            CalendarHub::new(client, auth)
        }
    };

    Ok(hub)
}
