//! Application services layer.

pub mod article;
pub mod chrome;
pub mod error;
pub mod gallery;
pub mod repos;
pub mod subscription;
