//! Shared application state injected into all handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::RedirectService;
use crate::domain::decision_event::DecisionEvent;

/// Deployment metadata reported by `/whoami`.
#[derive(Debug, Clone)]
pub struct DeploymentInfo {
    pub env: String,
    pub commit: String,
}

impl Default for DeploymentInfo {
    fn default() -> Self {
        Self {
            env: "unknown".to_string(),
            commit: "n/a".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    /// Decision event queue; `None` when decision records are disabled.
    pub decision_sender: Option<mpsc::Sender<DecisionEvent>>,
    pub deployment: Arc<DeploymentInfo>,
}

impl AppState {
    pub fn new(
        redirect_service: Arc<RedirectService>,
        decision_sender: Option<mpsc::Sender<DecisionEvent>>,
        deployment: DeploymentInfo,
    ) -> Self {
        Self {
            redirect_service,
            decision_sender,
            deployment: Arc::new(deployment),
        }
    }
}
