use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    account::entities::{AuthSession, UserProfile},
    common::entities::app_errors::CoreError,
};

#[cfg_attr(test, mockall::automock)]
pub trait AuthRepository: Send + Sync {
    /// Exchanges an identity provider token for a backend session.
    fn sign_in_with_id_token(
        &self,
        provider: String,
        id_token: String,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    fn get_profile(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<UserProfile>, CoreError>> + Send;

    fn upsert_profile(
        &self,
        profile: UserProfile,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;

    fn update_name(
        &self,
        user_id: Uuid,
        name: String,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;
}
