//! Application state for shared services

use std::sync::Arc;

use crate::api::middleware::AdminApiKey;
use crate::domain::CreatorRepository;
use crate::infrastructure::upload_link::UploadLinkServiceTrait;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub upload_link_service: Arc<dyn UploadLinkServiceTrait>,
    pub creator_repository: Arc<dyn CreatorRepository>,
    /// `None` disables the admin API
    pub admin_api_key: Option<AdminApiKey>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        upload_link_service: Arc<dyn UploadLinkServiceTrait>,
        creator_repository: Arc<dyn CreatorRepository>,
    ) -> Self {
        Self {
            upload_link_service,
            creator_repository,
            admin_api_key: None,
            max_upload_bytes: 512 * 1024 * 1024,
        }
    }

    pub fn with_admin_api_key(mut self, key: Option<AdminApiKey>) -> Self {
        self.admin_api_key = key;
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
