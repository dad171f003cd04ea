//! Document models and storage backends for pinlog.

pub mod models;
pub mod storage;
