//! ch-registry - Companies House reporting client
//!
//! Thin client for the UK Companies House REST API. Every report is a
//! single GET whose JSON `items` are mapped to typed rows and returned as a
//! [`Table`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ch_registry::CompaniesHouseClient;
//!
//! # async fn run() -> ch_registry::Result<()> {
//! let client = CompaniesHouseClient::from_env()?;
//! let results = client.get_search_results("shell", 5).await?;
//! println!("{}", results.render_text());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

pub mod config;

pub mod companies_house;

pub use companies_house::{
    CompaniesHouseClient, CompanyDocument, CompanyProfile, FilingsQuery, PageInfo, Table,
    Transport,
};
pub use config::ClientConfig;
pub use error::{CompaniesHouseError, Result};
