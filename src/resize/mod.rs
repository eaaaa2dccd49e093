pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod view;
#[cfg(feature = "image")]
pub(crate) mod image_ext;
pub(crate) mod plan;
