use std::sync::Arc;

use savora_core::{application::SavoraProxyService, domain::common::PublicConfig};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub proxy_service: Arc<SavoraProxyService>,
    pub public_config: PublicConfig,
}

impl AppState {
    pub fn new(
        args: Arc<Args>,
        proxy_service: SavoraProxyService,
        public_config: PublicConfig,
    ) -> Self {
        Self {
            args,
            proxy_service: Arc::new(proxy_service),
            public_config,
        }
    }
}
