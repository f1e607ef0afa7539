//! Shell of the star schema ETL: configuration, storage backends, the
//! load pipeline and output rendering around `starschema_core`.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod storage;
