//! Deployment smoke check: gates a navigation and loads metadata against the
//! configured backend, logging what it finds.

use std::env;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use frontend::domain::{GateOutcome, NavigationGate};
use frontend::outbound::{HistoryNavigator, ReqwestTransport};
use frontend::{ApiClient, ClientSettings};

const PROBE_PATH: &str = "/feedback";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ClientSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load client settings: {err}"))?;
    let api_base = settings
        .api_base_url()
        .wrap_err("backend url and api root do not form a url")?;
    let transport = ReqwestTransport::new(api_base.clone(), settings.request_timeout())
        .wrap_err("failed to build HTTP client")?;

    let navigator = Arc::new(HistoryNavigator::default());
    let client = ApiClient::with_error_capacity(
        Arc::new(transport),
        navigator.clone(),
        settings.error_channel_capacity(),
    );
    let gate = NavigationGate::new(Arc::new(client.clone()), navigator.clone())
        .with_landing(settings.landing_route());

    match gate.attempt(PROBE_PATH, None).await {
        GateOutcome::Proceed(route) => info!(%api_base, route = route.url(), "session accepted"),
        GateOutcome::Blocked => info!(
            %api_base,
            redirect = ?navigator.last().map(|target| target.to_string()),
            "no session, navigation redirected"
        ),
        GateOutcome::NotFound => warn!(path = PROBE_PATH, "probe route missing from route table"),
    }

    let metadata = client
        .get_metadata()
        .await
        .wrap_err("failed to load deployment metadata")?;
    match &metadata.metadata {
        Some(loaded) => info!(
            company = %loaded.company_name,
            business_unit = %loaded.business_unit,
            support = %metadata.support_contact(),
            passwordless = loaded.passwordless_access,
            "metadata loaded"
        ),
        None => warn!("backend has no metadata configured"),
    }
    Ok(())
}
