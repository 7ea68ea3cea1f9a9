//! HTTP plumbing shared by all handlers.

pub mod form;
pub mod mime;
pub mod response;

pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_file_response, build_html_response, build_redirect_response,
};
