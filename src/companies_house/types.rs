//! Companies House API response types
//!
//! Only the fields the reports use are mapped. Everything is optional or
//! defaulted so that an item missing a key still decodes.
//!
//! Reference: https://developer-specs.company-information.service.gov.uk

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Treat an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List envelope shared by search, PSC, officer, filing and charge responses
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ChList<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<T>,
    pub items_per_page: Option<u32>,
    pub start_index: Option<u32>,
    /// Sent by search, PSC and officer lists
    pub total_results: Option<u64>,
    /// Sent by filing history and charges
    pub total_count: Option<u64>,
}

impl<T> ChList<T> {
    /// Total across all pages, whichever key the endpoint uses
    pub fn total(&self) -> Option<u64> {
        self.total_results.or(self.total_count)
    }
}

/// `GET /search/companies` item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChSearchItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_number: String,
    pub company_status: Option<String>,
    pub company_type: Option<String>,
    pub date_of_creation: Option<String>,
    pub address_snippet: Option<String>,
}

/// Month/year date of birth; the register never publishes the day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartialDate {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl std::fmt::Display for PartialDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.month, self.year) {
            (Some(month), Some(year)) => write!(f, "{}/{}", month, year),
            (None, Some(year)) => write!(f, "{}", year),
            _ => Ok(()),
        }
    }
}

/// `GET /company/{n}/persons-with-significant-control` item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChPsc {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub nationality: Option<String>,
    pub country_of_residence: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub natures_of_control: Vec<String>,
    pub date_of_birth: Option<PartialDate>,
    pub notified_on: Option<String>,
    pub ceased_on: Option<String>,
}

/// `GET /company/{n}/officers` item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChOfficer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub officer_role: String,
    pub occupation: Option<String>,
    pub appointed_on: Option<String>,
    pub resigned_on: Option<String>,
    pub nationality: Option<String>,
    pub country_of_residence: Option<String>,
    pub date_of_birth: Option<PartialDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChFilingLinks {
    pub document_metadata: Option<String>,
}

/// `GET /company/{n}/filing-history` item, also the body of a single
/// `GET /company/{n}/filing-history/{transaction_id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChFiling {
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub description_values: Option<HashMap<String, serde_json::Value>>,
    pub action_date: Option<String>,
    #[serde(rename = "type")]
    pub filing_type: Option<String>,
    pub pages: Option<u32>,
    pub barcode: Option<String>,
    pub transaction_id: Option<String>,
    pub paper_filed: Option<bool>,
    pub links: Option<ChFilingLinks>,
}

impl ChFiling {
    pub fn document_metadata_url(&self) -> Option<&str> {
        self.links.as_ref()?.document_metadata.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChChargeClassification {
    #[serde(rename = "type")]
    pub classification_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChPersonEntitled {
    pub name: Option<String>,
}

/// `GET /company/{n}/charges` item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChCharge {
    pub charge_code: Option<String>,
    pub charge_number: Option<u32>,
    pub status: Option<String>,
    pub classification: Option<ChChargeClassification>,
    pub created_on: Option<String>,
    pub delivered_on: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub persons_entitled: Vec<ChPersonEntitled>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChDocumentLinks {
    pub document: Option<String>,
}

/// Document API metadata for one filing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChDocumentMetadata {
    pub pages: Option<u32>,
    #[serde(default)]
    pub links: ChDocumentLinks,
}

/// Registered office or correspondence address
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Address {
    pub premises: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Comma-joined address, skipping empty parts
    pub fn one_line(&self) -> String {
        [
            &self.premises,
            &self.address_line_1,
            &self.address_line_2,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// `GET /company/{n}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompanyProfile {
    #[serde(default, rename(deserialize = "company_name"), deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, rename(deserialize = "company_number"), deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(rename(deserialize = "company_status"))]
    pub status: Option<String>,
    #[serde(rename(deserialize = "type"))]
    pub company_type: Option<String>,
    #[serde(rename(deserialize = "date_of_creation"))]
    pub incorporation_date: Option<String>,
    pub date_of_cessation: Option<String>,
    pub jurisdiction: Option<String>,
    pub registered_office_address: Option<Address>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sic_codes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let search: ChSearchItem =
            serde_json::from_value(json!({"title": null, "company_number": null})).unwrap();
        assert_eq!(search.title, "");
        assert_eq!(search.company_number, "");

        let officer: ChOfficer =
            serde_json::from_value(json!({"name": null, "officer_role": null})).unwrap();
        assert_eq!(officer.name, "");
        assert_eq!(officer.officer_role, "");

        let profile: CompanyProfile =
            serde_json::from_value(json!({"company_name": null, "company_number": null}))
                .unwrap();
        assert_eq!(profile.name, "");
        assert_eq!(profile.number, "");
    }

    #[test]
    fn test_partial_date_display() {
        let full = PartialDate {
            month: Some(6),
            year: Some(1985),
        };
        assert_eq!(full.to_string(), "6/1985");

        let year_only = PartialDate {
            month: None,
            year: Some(1985),
        };
        assert_eq!(year_only.to_string(), "1985");
        assert_eq!(PartialDate::default().to_string(), "");
    }

    #[test]
    fn test_list_missing_items_is_empty() {
        let list: ChList<ChSearchItem> =
            serde_json::from_value(json!({"total_results": 0})).unwrap();
        assert!(list.items.is_empty());
        assert_eq!(list.total(), Some(0));

        let list: ChList<ChSearchItem> = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_list_total_falls_back_to_total_count() {
        let list: ChList<ChFiling> =
            serde_json::from_value(json!({"items": [], "total_count": 3})).unwrap();
        assert_eq!(list.total(), Some(3));
    }

    #[test]
    fn test_filing_document_metadata_url() {
        let filing: ChFiling = serde_json::from_value(json!({
            "category": "accounts",
            "links": {"document_metadata": "https://doc.test/document/abc"}
        }))
        .unwrap();
        assert_eq!(
            filing.document_metadata_url(),
            Some("https://doc.test/document/abc")
        );
        assert_eq!(ChFiling::default().document_metadata_url(), None);
    }

    #[test]
    fn test_address_one_line() {
        let address = Address {
            premises: Some("Shell Centre".into()),
            address_line_1: Some("York Road".into()),
            locality: Some("London".into()),
            postal_code: Some("SE1 7NA".into()),
            country: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(address.one_line(), "Shell Centre, York Road, London, SE1 7NA");
    }

    #[test]
    fn test_company_profile_decodes_and_serializes_with_own_names() {
        let profile: CompanyProfile = serde_json::from_value(json!({
            "company_name": "SHELL PLC",
            "company_number": "04366849",
            "company_status": "active",
            "type": "plc",
            "date_of_creation": "2002-02-05",
            "sic_codes": null
        }))
        .unwrap();

        assert_eq!(profile.name, "SHELL PLC");
        assert_eq!(profile.company_type.as_deref(), Some("plc"));
        assert!(profile.sic_codes.is_empty());

        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["name"], "SHELL PLC");
        assert_eq!(out["incorporation_date"], "2002-02-05");
    }
}
