//! Output rendering for the CLI

pub mod html;
pub mod timeline;
