use crate::config::Config;
use crate::error::StartupError;
use crate::templates;
use crate::upstream::UpstreamClient;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
    pub tera: Arc<Tera>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, StartupError> {
        let upstream = UpstreamClient::new(&config.api_url)?;
        let tera = templates::load(&config.template_dir)?;

        Ok(Self {
            config: Arc::new(config),
            upstream,
            tera: Arc::new(tera),
        })
    }
}
