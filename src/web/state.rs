use crate::config::EnvConfig;
use crate::core::services::ContentService;
use crate::web::security::SecurityPolicy;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    content: ContentService,
    env: EnvConfig,
    security: SecurityPolicy,
}

impl AppState {
    pub fn new(content: ContentService, env: EnvConfig) -> Self {
        let security = SecurityPolicy::new(env.is_development());
        Self {
            inner: Arc::new(InnerState {
                content,
                env,
                security,
            }),
        }
    }

    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    pub fn env(&self) -> &EnvConfig {
        &self.inner.env
    }

    pub fn security(&self) -> &SecurityPolicy {
        &self.inner.security
    }
}
