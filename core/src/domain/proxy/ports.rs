use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    proxy::value_objects::{ProxyRequest, ProxyResponse},
};

#[cfg_attr(test, mockall::automock)]
pub trait ProxyService: Send + Sync {
    fn forward(
        &self,
        request: ProxyRequest,
    ) -> impl Future<Output = Result<ProxyResponse, CoreError>> + Send;
}
