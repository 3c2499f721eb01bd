//! UK Companies House integration
//!
//! This module provides:
//! - API types for the search, PSC, officer, filing-history and charge endpoints
//! - Typed report rows and the tabular result they are returned in
//! - A client that issues one GET per report through an injectable transport
//! - The filing document value object

pub mod client;
pub mod company_number;
pub mod document;
pub mod rows;
pub mod table;
pub mod transport;
pub mod types;

pub use client::{CompaniesHouseClient, FilingsQuery};
pub use company_number::{is_valid_company_number, normalize_company_number};
pub use document::CompanyDocument;
pub use rows::{ChargeRow, FilingRow, OfficerRow, PscRow, SearchResultRow, TabularRow};
pub use table::{PageInfo, Table};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Address, CompanyProfile, PartialDate};
