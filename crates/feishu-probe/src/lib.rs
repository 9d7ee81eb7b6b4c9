#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod cache;
mod config;
mod prober;

pub use cache::{DEFAULT_CACHE_TTL, ProbeCache, TRACING_TARGET as TRACING_TARGET_CACHE};
pub use config::{DEFAULT_CACHE_TTL_SECS, DEFAULT_PROBE_TIMEOUT_SECS, ProbeConfig};
pub use feishu_core::{BotCredentials, FeishuDomain, MISSING_CREDENTIALS, ProbeResult};
pub use prober::{ProbeOptions, Prober, TRACING_TARGET as TRACING_TARGET_PROBER};
