//! Response Normalizer - shapes raw BOLD TSV bodies into specimen records.
//!
//! BOLD answers both search endpoints with a tab-separated table whose first
//! row names the columns. Prominent, documented columns map onto typed
//! fields; every other column is preserved verbatim in a pass-through map so
//! upstream schema growth never silently loses data.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Serialize;

use super::error::{SearchError, SearchResult};

/// Columns that carry sequence payloads or sequencing-run metadata.
///
/// These only appear on the combined endpoint and are the set removed when a
/// caller asks for specimen data without sequences.
pub const SEQUENCE_COLUMNS: &[&str] = &[
    "sequenceID",
    "markercode",
    "genbank_accession",
    "nucleotides",
    "trace_ids",
    "trace_names",
    "trace_links",
    "run_dates",
    "sequencing_centers",
    "directions",
    "seq_primers",
    "marker_codes",
];

/// Nucleotide sequence payload attached to a specimen record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct SequenceData {
    /// BOLD sequence identifier.
    #[serde(rename = "sequenceID", skip_serializing_if = "Option::is_none")]
    pub sequence_id: Option<String>,

    /// Genetic marker the sequence was read from (e.g. COI-5P).
    #[serde(rename = "markercode", skip_serializing_if = "Option::is_none")]
    pub marker_code: Option<String>,

    /// GenBank accession number, when the sequence was deposited there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genbank_accession: Option<String>,

    /// The nucleotide string itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nucleotides: Option<String>,
}

/// One normalized specimen record.
///
/// Serialized field names match the upstream TSV column names, so a record
/// round-trips recognizably against the BOLD documentation. Empty upstream
/// cells are absent here, not empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct SpecimenRecord {
    /// BOLD process ID, the primary specimen identifier.
    #[serde(rename = "processid", skip_serializing_if = "Option::is_none")]
    pub process_id: Option<String>,

    /// Collector-assigned sample ID.
    #[serde(rename = "sampleid", skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,

    /// Internal BOLD record number.
    #[serde(rename = "recordID", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    /// Museum catalog number.
    #[serde(rename = "catalognum", skip_serializing_if = "Option::is_none")]
    pub catalog_number: Option<String>,

    /// Field number.
    #[serde(rename = "fieldnum", skip_serializing_if = "Option::is_none")]
    pub field_number: Option<String>,

    /// Institution storing the specimen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_storing: Option<String>,

    /// Barcode Index Number URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_uri: Option<String>,

    #[serde(rename = "phylum_name", skip_serializing_if = "Option::is_none")]
    pub phylum: Option<String>,

    #[serde(rename = "class_name", skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(rename = "order_name", skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    #[serde(rename = "family_name", skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(rename = "subfamily_name", skip_serializing_if = "Option::is_none")]
    pub subfamily: Option<String>,

    #[serde(rename = "genus_name", skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,

    #[serde(rename = "species_name", skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    /// Who provided the identification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification_provided_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collectors: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,

    /// Sequence payload, present only for combined-endpoint rows that carry one.
    #[serde(flatten)]
    pub sequence: Option<SequenceData>,

    /// Every other upstream column, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SpecimenRecord {
    /// Whether any sequence payload or sequencing metadata is attached.
    pub fn has_sequence_data(&self) -> bool {
        self.sequence.is_some()
            || self
                .extra
                .keys()
                .any(|k| SEQUENCE_COLUMNS.contains(&k.as_str()))
    }

    /// Drop the sequence payload and sequencing metadata columns.
    pub fn without_sequence_data(mut self) -> Self {
        self.sequence = None;
        self.extra
            .retain(|name, _| !SEQUENCE_COLUMNS.contains(&name.as_str()));
        self
    }
}

/// Remove sequence payloads from every record.
pub fn strip_sequence_data(records: Vec<SpecimenRecord>) -> Vec<SpecimenRecord> {
    records
        .into_iter()
        .map(SpecimenRecord::without_sequence_data)
        .collect()
}

/// Structured payload returned by both search tools.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SpecimenSearchResult {
    /// Normalized records, in upstream order.
    pub records: Vec<SpecimenRecord>,
    /// Number of records returned.
    pub total_count: usize,
}

/// Parse a raw TSV response body into specimen records.
///
/// Fails with a parse error when the body is empty, the header row lacks the
/// `processid` column (present on every BOLD result table), or any row's cell
/// count disagrees with the header.
pub fn parse_records(body: &str) -> SearchResult<Vec<SpecimenRecord>> {
    if body.trim().is_empty() {
        return Err(SearchError::parse("empty response body"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(false)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SearchError::parse(format!("unreadable header row: {e}")))?
        .clone();

    if !headers.iter().any(|name| name == "processid") {
        return Err(SearchError::parse(
            "response is missing the 'processid' column; body is not a BOLD result table",
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| SearchError::parse(format!("malformed row: {e}")))?;
        records.push(record_from_row(&headers, &row));
    }
    Ok(records)
}

fn record_from_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> SpecimenRecord {
    let mut record = SpecimenRecord::default();
    let mut sequence = SequenceData::default();

    for (name, value) in headers.iter().zip(row.iter()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let value = value.to_string();
        match name {
            "processid" => record.process_id = Some(value),
            "sampleid" => record.sample_id = Some(value),
            "recordID" => record.record_id = Some(value),
            "catalognum" => record.catalog_number = Some(value),
            "fieldnum" => record.field_number = Some(value),
            "institution_storing" => record.institution_storing = Some(value),
            "bin_uri" => record.bin_uri = Some(value),
            "phylum_name" => record.phylum = Some(value),
            "class_name" => record.class = Some(value),
            "order_name" => record.order = Some(value),
            "family_name" => record.family = Some(value),
            "subfamily_name" => record.subfamily = Some(value),
            "genus_name" => record.genus = Some(value),
            "species_name" => record.species = Some(value),
            "identification_provided_by" => record.identification_provided_by = Some(value),
            "collectors" => record.collectors = Some(value),
            "country" => record.country = Some(value),
            "province_state" => record.province_state = Some(value),
            "region" => record.region = Some(value),
            "lat" => record.lat = Some(value),
            "lon" => record.lon = Some(value),
            "sequenceID" => sequence.sequence_id = Some(value),
            "markercode" => sequence.marker_code = Some(value),
            "genbank_accession" => sequence.genbank_accession = Some(value),
            "nucleotides" => sequence.nucleotides = Some(value),
            _ => {
                record.extra.insert(name.to_string(), value);
            }
        }
    }

    if sequence != SequenceData::default() {
        record.sequence = Some(sequence);
    }
    record
}
