//! Report rows
//!
//! One typed record per endpoint, each built from a decoded API item by an
//! explicit mapping function. Absent keys become `None`, an empty string or
//! zero; a mapping never fails.

use super::types::{ChCharge, ChFiling, ChOfficer, ChPsc, ChSearchItem, PartialDate};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// A record that can be laid out as one row of a [`super::table::Table`]
pub trait TabularRow {
    /// Column headings, in display order
    const COLUMNS: &'static [&'static str];

    /// Cell text, one per entry of `COLUMNS`
    fn cells(&self) -> Vec<String>;
}

/// Companies House dates are ISO `YYYY-MM-DD`
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(value, error = %e, "Ignoring unparseable date");
            None
        }
    }
}

fn date_cell(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn text_cell(text: &Option<String>) -> String {
    text.clone().unwrap_or_default()
}

// =============================================================================
// Search
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultRow {
    pub name: String,
    pub company_number: String,
    pub status: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    pub company_type: Option<String>,
    pub address: Option<String>,
}

impl SearchResultRow {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

pub fn search_row(item: ChSearchItem) -> SearchResultRow {
    SearchResultRow {
        incorporation_date: parse_date(item.date_of_creation.as_deref()),
        name: item.title,
        company_number: item.company_number,
        status: item.company_status,
        company_type: item.company_type,
        address: item.address_snippet,
    }
}

impl TabularRow for SearchResultRow {
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Company Number",
        "Status",
        "Incorporation Date",
        "Company Type",
        "Address",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.company_number.clone(),
            text_cell(&self.status),
            date_cell(&self.incorporation_date),
            text_cell(&self.company_type),
            text_cell(&self.address),
        ]
    }
}

// =============================================================================
// Persons with significant control
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PscRow {
    pub name: String,
    pub kind: Option<String>,
    pub nationality: Option<String>,
    pub country_of_residence: Option<String>,
    pub natures_of_control: Vec<String>,
    pub date_of_birth: Option<PartialDate>,
    pub notified_on: Option<NaiveDate>,
    pub ceased_on: Option<NaiveDate>,
}

impl PscRow {
    /// Still holding control, i.e. no cessation date
    pub fn is_active(&self) -> bool {
        self.ceased_on.is_none()
    }
}

pub fn psc_row(item: ChPsc) -> PscRow {
    PscRow {
        name: item.name.unwrap_or_default(),
        kind: item.kind,
        nationality: item.nationality,
        country_of_residence: item.country_of_residence,
        natures_of_control: item.natures_of_control,
        date_of_birth: item.date_of_birth,
        notified_on: parse_date(item.notified_on.as_deref()),
        ceased_on: parse_date(item.ceased_on.as_deref()),
    }
}

impl TabularRow for PscRow {
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Kind",
        "Nationality",
        "Country of Residence",
        "Natures of Control",
        "Date of Birth",
        "Notified On",
        "Ceased On",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text_cell(&self.kind),
            text_cell(&self.nationality),
            text_cell(&self.country_of_residence),
            self.natures_of_control.join(", "),
            self.date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_default(),
            date_cell(&self.notified_on),
            date_cell(&self.ceased_on),
        ]
    }
}

// =============================================================================
// Officers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficerRow {
    pub name: String,
    pub officer_role: String,
    pub occupation: Option<String>,
    pub appointed_on: Option<NaiveDate>,
    pub resigned_on: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub country_of_residence: Option<String>,
}

impl OfficerRow {
    pub fn is_active(&self) -> bool {
        self.resigned_on.is_none()
    }
}

pub fn officer_row(item: ChOfficer) -> OfficerRow {
    OfficerRow {
        name: item.name,
        officer_role: item.officer_role,
        occupation: item.occupation,
        appointed_on: parse_date(item.appointed_on.as_deref()),
        resigned_on: parse_date(item.resigned_on.as_deref()),
        nationality: item.nationality,
        country_of_residence: item.country_of_residence,
    }
}

impl TabularRow for OfficerRow {
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Officer Role",
        "Occupation",
        "Appointed On",
        "Resigned On",
        "Nationality",
        "Country of Residence",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.officer_role.clone(),
            text_cell(&self.occupation),
            date_cell(&self.appointed_on),
            date_cell(&self.resigned_on),
            text_cell(&self.nationality),
            text_cell(&self.country_of_residence),
        ]
    }
}

// =============================================================================
// Filing history
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingRow {
    pub category: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub filing_type: String,
    pub pages: u32,
    pub barcode: Option<String>,
    pub transaction_id: String,
    pub action_date: Option<NaiveDate>,
}

pub fn filing_row(item: ChFiling) -> FilingRow {
    FilingRow {
        category: item.category.unwrap_or_default(),
        date: parse_date(item.date.as_deref()),
        description: item.description.unwrap_or_default(),
        filing_type: item.filing_type.unwrap_or_default(),
        pages: item.pages.unwrap_or(0),
        barcode: item.barcode,
        transaction_id: item.transaction_id.unwrap_or_default(),
        action_date: parse_date(item.action_date.as_deref()),
    }
}

impl TabularRow for FilingRow {
    const COLUMNS: &'static [&'static str] = &[
        "Category",
        "Date",
        "Description",
        "Type",
        "Pages",
        "Barcode",
        "Transaction ID",
        "Action Date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            date_cell(&self.date),
            self.description.clone(),
            self.filing_type.clone(),
            self.pages.to_string(),
            text_cell(&self.barcode),
            self.transaction_id.clone(),
            date_cell(&self.action_date),
        ]
    }
}

// =============================================================================
// Charges
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeRow {
    /// Charge code, or the legacy charge number for older charges
    pub charge_code: String,
    pub status: Option<String>,
    pub classification: Option<String>,
    pub created_on: Option<NaiveDate>,
    pub delivered_on: Option<NaiveDate>,
    pub persons_entitled: Vec<String>,
}

pub fn charge_row(item: ChCharge) -> ChargeRow {
    let charge_code = item
        .charge_code
        .or_else(|| item.charge_number.map(|n| n.to_string()))
        .unwrap_or_default();

    ChargeRow {
        charge_code,
        status: item.status,
        classification: item.classification.and_then(|c| c.description),
        created_on: parse_date(item.created_on.as_deref()),
        delivered_on: parse_date(item.delivered_on.as_deref()),
        persons_entitled: item
            .persons_entitled
            .into_iter()
            .filter_map(|p| p.name)
            .collect(),
    }
}

impl TabularRow for ChargeRow {
    const COLUMNS: &'static [&'static str] = &[
        "Charge Code",
        "Status",
        "Classification",
        "Created On",
        "Delivered On",
        "Persons Entitled",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.charge_code.clone(),
            text_cell(&self.status),
            text_cell(&self.classification),
            date_cell(&self.created_on),
            date_cell(&self.delivered_on),
            self.persons_entitled.join(", "),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2002-02-05")),
            NaiveDate::from_ymd_opt(2002, 2, 5)
        );
        assert_eq!(parse_date(Some("5 February 2002")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_psc_row_from_sparse_item() {
        let item: ChPsc = serde_json::from_value(json!({
            "name": "Mrs Shelley Ann Fray",
            "natures_of_control": ["ownership-of-shares-75-to-100-percent"],
            "date_of_birth": {"month": 6, "year": 1985}
        }))
        .unwrap();

        let row = psc_row(item);
        assert_eq!(row.name, "Mrs Shelley Ann Fray");
        assert_eq!(row.nationality, None);
        assert!(row.is_active());

        let cells = row.cells();
        assert_eq!(cells.len(), PscRow::COLUMNS.len());
        assert_eq!(cells[4], "ownership-of-shares-75-to-100-percent");
        assert_eq!(cells[5], "6/1985");
        assert_eq!(cells[2], "");
    }

    #[test]
    fn test_officer_row_resigned() {
        let row = officer_row(ChOfficer {
            name: "FRAY, Shelley Ann".into(),
            officer_role: "director".into(),
            resigned_on: Some("2023-03-01".into()),
            ..Default::default()
        });
        assert!(!row.is_active());
        assert_eq!(row.cells()[4], "2023-03-01");
    }

    #[test]
    fn test_filing_row_defaults() {
        let row = filing_row(ChFiling::default());
        assert_eq!(row.category, "");
        assert_eq!(row.pages, 0);
        assert_eq!(row.action_date, None);
        assert_eq!(row.cells().len(), FilingRow::COLUMNS.len());
    }

    #[test]
    fn test_charge_row_falls_back_to_charge_number() {
        let item: ChCharge = serde_json::from_value(json!({
            "charge_number": 4,
            "status": "outstanding",
            "classification": {"type": "charge-description", "description": "Legal charge"},
            "persons_entitled": [{"name": "Barclays Bank PLC"}, {}]
        }))
        .unwrap();

        let row = charge_row(item);
        assert_eq!(row.charge_code, "4");
        assert_eq!(row.classification.as_deref(), Some("Legal charge"));
        assert_eq!(row.persons_entitled, vec!["Barclays Bank PLC".to_string()]);
    }

    #[test]
    fn test_search_row_is_active() {
        let row = search_row(ChSearchItem {
            title: "SHELL PLC".into(),
            company_number: "04366849".into(),
            company_status: Some("dissolved".into()),
            ..Default::default()
        });
        assert!(!row.is_active());
        assert_eq!(row.cells()[0], "SHELL PLC");
    }
}
