//! Companies House API client
//!
//! Each report is one GET: decode the list envelope, map every item to a
//! typed row, return the rows as a [`Table`]. Errors from the transport or
//! the decode are returned as-is.

use super::company_number::normalize_company_number;
use super::document::CompanyDocument;
use super::rows::{
    charge_row, filing_row, officer_row, psc_row, search_row, ChargeRow, FilingRow, OfficerRow,
    PscRow, SearchResultRow, TabularRow,
};
use super::table::{PageInfo, Table};
use super::transport::{ReqwestTransport, Transport};
use super::types::{
    ChCharge, ChDocumentMetadata, ChFiling, ChList, ChOfficer, ChPsc, ChSearchItem, CompanyProfile,
};
use crate::config::ClientConfig;
use crate::error::{CompaniesHouseError, Result};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Options for a single filing-history page
#[derive(Debug, Clone, Default)]
pub struct FilingsQuery {
    /// Restrict to one category (e.g. `accounts`, `confirmation-statement`)
    pub category: Option<String>,
    pub start_index: Option<u32>,
    pub items_per_page: Option<u32>,
}

impl FilingsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(start) = self.start_index {
            params.push(("start_index", start.to_string()));
        }
        if let Some(per_page) = self.items_per_page {
            params.push(("items_per_page", per_page.to_string()));
        }
        params
    }
}

/// Companies House API client
pub struct CompaniesHouseClient<T: Transport = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl CompaniesHouseClient<ReqwestTransport> {
    /// Create a live client from `COMPANIES_HOUSE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(
            ReqwestTransport::new(config)?,
            config.base_url.clone(),
        ))
    }
}

impl<T: Transport> CompaniesHouseClient<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an absolute URL and decode the JSON body into `D`
    async fn fetch_url<D: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<D> {
        let value = self.transport.get_json(url, params).await?;
        serde_json::from_value(value).map_err(|e| CompaniesHouseError::parse(url, e))
    }

    /// Base URL plus `segments`, each percent-encoded as a single path segment
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let invalid = |message: &str| CompaniesHouseError::InvalidUrl {
            url: self.base_url.clone(),
            message: message.to_string(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    async fn fetch<D: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<D> {
        let url = self.endpoint(segments)?;
        self.fetch_url(&url, params).await
    }

    async fn fetch_table<I, R>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
        map: fn(I) -> R,
    ) -> Result<Table<R>>
    where
        I: DeserializeOwned,
        R: TabularRow,
    {
        let list: ChList<I> = self.fetch(segments, params).await?;
        let page = PageInfo::from_list(&list);
        let rows: Vec<R> = list.items.into_iter().map(map).collect();
        debug!(path = %segments.join("/"), rows = rows.len(), total = ?page.total, "Mapped list response");
        Ok(Table::new(rows, page))
    }

    /// Search companies by name; at most `limit` rows, from one response
    pub async fn get_search_results(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Table<SearchResultRow>> {
        let params = [
            ("q", query.to_string()),
            ("items_per_page", limit.to_string()),
        ];
        let mut table = self
            .fetch_table::<ChSearchItem, _>(&["search", "companies"], &params, search_row)
            .await?;

        table.rows.truncate(limit);
        table.page.returned = table.rows.len();
        Ok(table)
    }

    /// Get company profile by company number
    pub async fn get_company_info(&self, number: &str) -> Result<CompanyProfile> {
        let number = normalize_company_number(number);
        self.fetch(&["company", number.as_str()], &[]).await
    }

    /// Get Persons with Significant Control for a company
    pub async fn get_persons_with_significant_control(
        &self,
        number: &str,
    ) -> Result<Table<PscRow>> {
        let number = normalize_company_number(number);
        self.fetch_table::<ChPsc, _>(
            &["company", number.as_str(), "persons-with-significant-control"],
            &[],
            psc_row,
        )
        .await
    }

    /// Get officers for a company
    pub async fn get_officers(&self, number: &str) -> Result<Table<OfficerRow>> {
        let number = normalize_company_number(number);
        self.fetch_table::<ChOfficer, _>(
            &["company", number.as_str(), "officers"],
            &[],
            officer_row,
        )
        .await
    }

    /// First page of the filing history, as the API pages it by default
    pub async fn get_filings(&self, number: &str) -> Result<Table<FilingRow>> {
        self.get_filings_page(number, &FilingsQuery::default()).await
    }

    /// One page of the filing history
    ///
    /// Use `table.page.next_start_index()` to ask for the page after this.
    pub async fn get_filings_page(
        &self,
        number: &str,
        query: &FilingsQuery,
    ) -> Result<Table<FilingRow>> {
        let number = normalize_company_number(number);
        self.fetch_table::<ChFiling, _>(
            &["company", number.as_str(), "filing-history"],
            &query.params(),
            filing_row,
        )
        .await
    }

    /// Get registered charges (mortgages) for a company
    pub async fn get_charges(&self, number: &str) -> Result<Table<ChargeRow>> {
        let number = normalize_company_number(number);
        self.fetch_table::<ChCharge, _>(
            &["company", number.as_str(), "charges"],
            &[],
            charge_row,
        )
        .await
    }

    /// Fetch one filing and its PDF from the document API
    pub async fn get_filing_document(
        &self,
        number: &str,
        transaction_id: &str,
    ) -> Result<CompanyDocument> {
        let number = normalize_company_number(number);
        let filing: ChFiling = self
            .fetch(
                &["company", number.as_str(), "filing-history", transaction_id],
                &[],
            )
            .await?;

        let no_document = || CompaniesHouseError::NoDocument {
            transaction_id: transaction_id.to_string(),
        };

        let metadata_url = filing.document_metadata_url().ok_or_else(no_document)?;
        let metadata: ChDocumentMetadata = self.fetch_url(metadata_url, &[]).await?;

        let content_url = metadata
            .links
            .document
            .clone()
            .unwrap_or_else(|| format!("{}/content", metadata_url.trim_end_matches('/')));
        let content = self
            .transport
            .get_bytes(&content_url, "application/pdf")
            .await?;
        debug!(transaction_id, bytes = content.len(), "Fetched filing document");

        let status = if filing.paper_filed.unwrap_or(false) {
            "paper_filed"
        } else {
            "electronic"
        };

        Ok(CompanyDocument::new(
            filing.category.unwrap_or_default(),
            filing.date.unwrap_or_default(),
            filing.description.unwrap_or_default(),
            status,
            filing.pages.or(metadata.pages).unwrap_or(0),
            transaction_id,
            content,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoTransport;

    #[async_trait::async_trait]
    impl Transport for NoTransport {
        async fn get_json(&self, url: &str, _: &[(&str, String)]) -> Result<serde_json::Value> {
            Err(CompaniesHouseError::request(url, "offline"))
        }

        async fn get_bytes(&self, url: &str, _: &str) -> Result<Vec<u8>> {
            Err(CompaniesHouseError::request(url, "offline"))
        }
    }

    #[test]
    fn test_endpoint_encodes_each_segment() {
        let client = CompaniesHouseClient::with_transport(NoTransport, "https://api.test/");

        assert_eq!(
            client.endpoint(&["company", "01234567", "officers"]).unwrap(),
            "https://api.test/company/01234567/officers"
        );
        assert_eq!(
            client.endpoint(&["company", "1?A=B#", "officers"]).unwrap(),
            "https://api.test/company/1%3FA=B%23/officers"
        );
        assert_eq!(
            client.endpoint(&["company", "1", "filing-history", "../x"]).unwrap(),
            "https://api.test/company/1/filing-history/..%2Fx"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = CompaniesHouseClient::with_transport(NoTransport, "http://proxy.test/ch");
        assert_eq!(
            client.endpoint(&["search", "companies"]).unwrap(),
            "http://proxy.test/ch/search/companies"
        );
    }

    #[test]
    fn test_filings_query_params() {
        assert!(FilingsQuery::new().params().is_empty());

        let params = FilingsQuery::new()
            .with_category("accounts")
            .with_start_index(25)
            .with_items_per_page(25)
            .params();
        assert_eq!(
            params,
            vec![
                ("category", "accounts".to_string()),
                ("start_index", "25".to_string()),
                ("items_per_page", "25".to_string()),
            ]
        );
    }
}
