use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

#[cfg_attr(test, mockall::automock)]
pub trait ChatService: Send + Sync {
    /// Forwards `message` as a single-turn completion and returns the reply as is.
    fn chat(&self, message: String) -> impl Future<Output = Result<String, CoreError>> + Send;
}
