use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    history::entities::{HistoryItem, NewHistoryItem},
};

#[cfg_attr(test, mockall::automock)]
pub trait HistoryRepository: Send + Sync {
    /// Newest first.
    fn list(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<HistoryItem>, CoreError>> + Send;

    fn append(
        &self,
        user_id: Uuid,
        item: NewHistoryItem,
    ) -> impl Future<Output = Result<HistoryItem, CoreError>> + Send;

    fn clear(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
