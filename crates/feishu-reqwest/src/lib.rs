#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod token;

pub use client::FeishuClient;
pub use config::{DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use error::{Error, Result};

/// Tracing target for open platform client operations.
pub const TRACING_TARGET: &str = "feishu_reqwest::client";
