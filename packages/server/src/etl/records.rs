use std::collections::HashSet;
use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::EtlError;
use super::normalize::{normalize_header, normalize_id, parse_date, parse_length, present, title_case};

/// Why a CSV row was dropped before reaching the store.
#[derive(Debug, PartialEq)]
pub enum RowIssue {
    /// A required field is missing or blank.
    Incomplete,
    /// A field is present but cannot be parsed.
    Invalid(String),
}

/// One entity snapshot file.
pub trait CsvRecord: Sized {
    type Raw: DeserializeOwned;

    /// Singular entity name used in logs.
    const ENTITY: &'static str;
    /// Columns that must appear in the header row.
    const REQUIRED: &'static [&'static str];

    fn from_raw(raw: Self::Raw) -> Result<Self, RowIssue>;

    /// In-batch uniqueness key.
    fn key(&self) -> String;
}

/// Parsed, normalized and de-duplicated rows of one file.
#[derive(Debug)]
pub struct Batch<T> {
    pub rows: Vec<T>,
    /// Keys skipped because an earlier row already used them.
    pub duplicates: Vec<String>,
    pub incomplete: usize,
    pub invalid: usize,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            duplicates: Vec::new(),
            incomplete: 0,
            invalid: 0,
        }
    }
}

/// Read every row of `reader`, keeping the first occurrence of each key.
pub fn parse_batch<T: CsvRecord, R: Read>(file: &str, reader: R) -> Result<Batch<T>, EtlError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: StringRecord = rdr
        .headers()
        .map_err(|source| EtlError::Csv {
            file: file.to_string(),
            source,
        })?
        .iter()
        .map(normalize_header)
        .collect();

    for column in T::REQUIRED {
        if !headers.iter().any(|h| h == *column) {
            return Err(EtlError::MissingColumn {
                file: file.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    rdr.set_headers(headers);

    let mut batch = Batch::default();
    let mut seen = HashSet::new();

    for (line, result) in rdr.deserialize::<T::Raw>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!(file, row = line + 2, "Skipping unreadable {} row: {}", T::ENTITY, e);
                batch.invalid += 1;
                continue;
            }
        };

        let record = match T::from_raw(raw) {
            Ok(record) => record,
            Err(RowIssue::Incomplete) => {
                batch.incomplete += 1;
                continue;
            }
            Err(RowIssue::Invalid(reason)) => {
                warn!(file, row = line + 2, "Skipping {}: {}", T::ENTITY, reason);
                batch.invalid += 1;
                continue;
            }
        };

        let key = record.key();
        if !seen.insert(key.clone()) {
            batch.duplicates.push(key);
            continue;
        }
        batch.rows.push(record);
    }

    Ok(batch)
}

#[derive(Deserialize)]
pub struct RawSite {
    site_id: Option<String>,
    site_name: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub site_id: String,
    pub name: String,
    pub location: String,
}

impl CsvRecord for SiteRecord {
    type Raw = RawSite;
    const ENTITY: &'static str = "site";
    const REQUIRED: &'static [&'static str] = &["site_id", "site_name", "location"];

    fn from_raw(raw: RawSite) -> Result<Self, RowIssue> {
        let (Some(site_id), Some(name), Some(location)) = (
            present(raw.site_id),
            present(raw.site_name),
            present(raw.location),
        ) else {
            return Err(RowIssue::Incomplete);
        };
        Ok(Self {
            site_id: normalize_id(&site_id),
            name: title_case(&name),
            location: title_case(&location),
        })
    }

    fn key(&self) -> String {
        self.site_id.clone()
    }
}

#[derive(Deserialize)]
pub struct RawTurbine {
    turbine_id: Option<String>,
    site_id: Option<String>,
    turbine_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurbineRecord {
    pub turbine_id: String,
    pub site_id: String,
    pub model: String,
}

impl CsvRecord for TurbineRecord {
    type Raw = RawTurbine;
    const ENTITY: &'static str = "turbine";
    const REQUIRED: &'static [&'static str] = &["turbine_id", "site_id", "turbine_model"];

    fn from_raw(raw: RawTurbine) -> Result<Self, RowIssue> {
        let (Some(turbine_id), Some(site_id), Some(model)) = (
            present(raw.turbine_id),
            present(raw.site_id),
            present(raw.turbine_model),
        ) else {
            return Err(RowIssue::Incomplete);
        };
        Ok(Self {
            turbine_id: normalize_id(&turbine_id),
            site_id: normalize_id(&site_id),
            model: title_case(&model),
        })
    }

    fn key(&self) -> String {
        self.turbine_id.clone()
    }
}

#[derive(Deserialize)]
pub struct RawBlade {
    blade_id: Option<String>,
    turbine_id: Option<String>,
    blade_type: Option<String>,
    length_m: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BladeRecord {
    pub blade_id: String,
    pub turbine_id: String,
    pub blade_type: String,
    pub length: i32,
}

impl CsvRecord for BladeRecord {
    type Raw = RawBlade;
    const ENTITY: &'static str = "blade";
    const REQUIRED: &'static [&'static str] = &["blade_id", "turbine_id", "blade_type", "length_m"];

    fn from_raw(raw: RawBlade) -> Result<Self, RowIssue> {
        let (Some(blade_id), Some(turbine_id), Some(blade_type), Some(length)) = (
            present(raw.blade_id),
            present(raw.turbine_id),
            present(raw.blade_type),
            present(raw.length_m),
        ) else {
            return Err(RowIssue::Incomplete);
        };
        let blade_id = normalize_id(&blade_id);
        let length = parse_length(&length)
            .ok_or_else(|| RowIssue::Invalid(format!("bad length '{length}' for {blade_id}")))?;
        Ok(Self {
            blade_id,
            turbine_id: normalize_id(&turbine_id),
            blade_type: title_case(&blade_type),
            length,
        })
    }

    fn key(&self) -> String {
        self.blade_id.clone()
    }
}

#[derive(Deserialize)]
pub struct RawMaintenance {
    blade_id: Option<String>,
    date: Option<String>,
    repair_status: Option<String>,
    issue_found: Option<String>,
    technician: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    pub blade_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub issue: String,
    pub technician: String,
}

impl CsvRecord for MaintenanceRecord {
    type Raw = RawMaintenance;
    const ENTITY: &'static str = "maintenance record";
    const REQUIRED: &'static [&'static str] =
        &["blade_id", "date", "repair_status", "issue_found", "technician"];

    fn from_raw(raw: RawMaintenance) -> Result<Self, RowIssue> {
        let (Some(blade_id), Some(date), Some(status), Some(issue), Some(technician)) = (
            present(raw.blade_id),
            present(raw.date),
            present(raw.repair_status),
            present(raw.issue_found),
            present(raw.technician),
        ) else {
            return Err(RowIssue::Incomplete);
        };
        let blade_id = normalize_id(&blade_id);
        let date = parse_date(&date)
            .ok_or_else(|| RowIssue::Invalid(format!("bad date '{date}' for {blade_id}")))?;
        Ok(Self {
            blade_id,
            date,
            status: title_case(&status),
            issue: title_case(&issue),
            technician: title_case(&technician),
        })
    }

    /// One visit per blade per day.
    fn key(&self) -> String {
        format!("{}@{}", self.blade_id, self.date)
    }
}
