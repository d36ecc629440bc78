//! Upload link orchestration

mod service;

pub use service::{
    CompletedUpload, IssuedUploadLink, UploadLinkService, UploadLinkServiceTrait,
    UploadLinkSettings, UploadLinkStatus, INVALID_LINK_MESSAGE,
};

#[cfg(test)]
pub use service::MockUploadLinkServiceTrait;
