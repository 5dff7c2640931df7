#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod error;
#[cfg(feature = "async-tokio")]
mod futures;
mod generator;
mod layout;
mod time;

pub use crate::config::*;
pub use crate::error::*;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::layout::*;
pub use crate::time::*;
