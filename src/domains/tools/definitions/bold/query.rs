//! Query Parameter Mapper for the BOLD public API.
//!
//! Translates validated tool arguments into the query-parameter set the
//! BOLD `API_Public` endpoints understand. Filters follow the upstream
//! documentation: every multi-value field is pipe-delimited, and the output
//! format is always pinned to TSV, the format the normalizer consumes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{SearchError, SearchResult};

/// Parameters for the `specimen-search` tool.
///
/// All filters are individually optional; at least one must be supplied.
/// Unrecognized argument names are rejected at deserialization.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SpecimenSearchParams {
    /// Taxonomic query.
    #[schemars(description = "Taxonomic query (e.g., 'Aves', 'Bos taurus')")]
    pub taxon: Option<String>,

    /// Geographic sites.
    #[schemars(description = "Geographic sites (countries/provinces, pipe-delimited)")]
    pub geo: Option<String>,

    /// Specimen identifiers.
    #[schemars(description = "Specific specimen IDs (pipe-delimited)")]
    pub ids: Option<String>,

    /// Barcode Index Number URIs.
    #[schemars(description = "Barcode Index Number (BIN) URIs like 'BOLD:AAA1234' (pipe-delimited)")]
    pub bin: Option<String>,

    /// Project or dataset codes.
    #[schemars(description = "Project or dataset codes (pipe-delimited)")]
    pub container: Option<String>,

    /// Storing institutions.
    #[schemars(description = "Specimen storing institutions (pipe-delimited)")]
    pub institution: Option<String>,

    /// Collector or identifier names.
    #[schemars(description = "Collector or identifier names (pipe-delimited)")]
    pub researchers: Option<String>,
}

/// Parameters for the `combined-search` tool.
///
/// Same filters as `specimen-search`, plus marker selection and a flag
/// controlling whether sequence data appears in the returned records.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CombinedSearchParams {
    /// Taxonomic query.
    #[schemars(description = "Taxonomic query (e.g., 'Aves', 'Bos taurus')")]
    pub taxon: Option<String>,

    /// Geographic sites.
    #[schemars(description = "Geographic sites (countries/provinces, pipe-delimited)")]
    pub geo: Option<String>,

    /// Specimen identifiers.
    #[schemars(description = "Specific specimen IDs (pipe-delimited)")]
    pub ids: Option<String>,

    /// Barcode Index Number URIs.
    #[schemars(description = "Barcode Index Number (BIN) URIs like 'BOLD:AAA1234' (pipe-delimited)")]
    pub bin: Option<String>,

    /// Project or dataset codes.
    #[schemars(description = "Project or dataset codes (pipe-delimited)")]
    pub container: Option<String>,

    /// Storing institutions.
    #[schemars(description = "Specimen storing institutions (pipe-delimited)")]
    pub institution: Option<String>,

    /// Collector or identifier names.
    #[schemars(description = "Collector or identifier names (pipe-delimited)")]
    pub researchers: Option<String>,

    /// Genetic marker codes.
    #[schemars(description = "Marker codes like 'matK', 'rbcL', 'COI-5P' (pipe-delimited)")]
    pub marker: Option<String>,

    /// Whether sequence payloads are kept in the returned records.
    #[serde(default, alias = "include-sequence")]
    #[schemars(description = "Include nucleotide sequence data in returned records (default: false)")]
    pub include_sequence: bool,
}

/// A validated, immutable BOLD query.
///
/// Built fresh per request and serialized straight into the request URL;
/// only recognized fields can appear in the encoded output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    taxon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    researchers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker: Option<String>,
    /// Always "tsv"; the normalizer understands no other output format.
    format: &'static str,
}

impl SearchQuery {
    /// Encode the query as a URL query string.
    pub fn encode(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

impl SpecimenSearchParams {
    /// Validate and map these arguments into a [`SearchQuery`].
    pub fn to_query(&self) -> SearchResult<SearchQuery> {
        let query = SearchQuery {
            taxon: clean_text("taxon", self.taxon.as_deref())?,
            geo: clean_list("geo", self.geo.as_deref())?,
            ids: clean_list("ids", self.ids.as_deref())?,
            bin: clean_bins(self.bin.as_deref())?,
            container: clean_list("container", self.container.as_deref())?,
            institution: clean_list("institution", self.institution.as_deref())?,
            researchers: clean_list("researchers", self.researchers.as_deref())?,
            marker: None,
            format: "tsv",
        };
        require_filter(&query)?;
        Ok(query)
    }
}

impl CombinedSearchParams {
    /// Validate and map these arguments into a [`SearchQuery`].
    pub fn to_query(&self) -> SearchResult<SearchQuery> {
        let query = SearchQuery {
            taxon: clean_text("taxon", self.taxon.as_deref())?,
            geo: clean_list("geo", self.geo.as_deref())?,
            ids: clean_list("ids", self.ids.as_deref())?,
            bin: clean_bins(self.bin.as_deref())?,
            container: clean_list("container", self.container.as_deref())?,
            institution: clean_list("institution", self.institution.as_deref())?,
            researchers: clean_list("researchers", self.researchers.as_deref())?,
            marker: clean_list("marker", self.marker.as_deref())?,
            format: "tsv",
        };
        require_filter(&query)?;
        Ok(query)
    }
}

/// At least one discriminating filter must survive cleaning.
fn require_filter(query: &SearchQuery) -> SearchResult<()> {
    let any = query.taxon.is_some()
        || query.geo.is_some()
        || query.ids.is_some()
        || query.bin.is_some()
        || query.container.is_some()
        || query.institution.is_some()
        || query.researchers.is_some()
        || query.marker.is_some();
    if any {
        Ok(())
    } else {
        Err(SearchError::validation(
            "at least one search filter (taxon, geo, ids, bin, container, \
             institution, researchers) must be provided",
        ))
    }
}

/// Normalize a free-text filter; blank values count as absent.
fn clean_text(name: &str, value: Option<&str>) -> SearchResult<Option<String>> {
    let Some(raw) = value else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.contains(|c: char| c.is_control()) {
        return Err(SearchError::validation(format!(
            "filter '{name}' contains control characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Normalize a pipe-delimited filter: trim each entry, reject empty entries.
fn clean_list(name: &str, value: Option<&str>) -> SearchResult<Option<String>> {
    let Some(raw) = value else { return Ok(None) };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let entries: Vec<&str> = raw.split('|').map(str::trim).collect();
    if entries.iter().any(|e| e.is_empty()) {
        return Err(SearchError::validation(format!(
            "filter '{name}' contains an empty pipe-delimited entry"
        )));
    }
    if entries.iter().any(|e| e.contains(|c: char| c.is_control())) {
        return Err(SearchError::validation(format!(
            "filter '{name}' contains control characters"
        )));
    }
    Ok(Some(entries.join("|")))
}

/// BIN URIs carry a fixed shape: `BOLD:` followed by alphanumerics.
fn clean_bins(value: Option<&str>) -> SearchResult<Option<String>> {
    let cleaned = clean_list("bin", value)?;
    if let Some(list) = &cleaned {
        for entry in list.split('|') {
            if !is_bin_uri(entry) {
                return Err(SearchError::validation(format!(
                    "'{entry}' is not a BIN URI (expected 'BOLD:' followed by alphanumerics)"
                )));
            }
        }
    }
    Ok(cleaned)
}

fn is_bin_uri(entry: &str) -> bool {
    entry
        .strip_prefix("BOLD:")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_filter_maps_to_query() {
        let params = SpecimenSearchParams {
            taxon: Some("Apis mellifera".to_string()),
            ..Default::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.encode(), "taxon=Apis+mellifera&format=tsv");
    }

    #[test]
    fn test_encode_contains_only_supplied_fields() {
        let params = SpecimenSearchParams {
            geo: Some("Canada|Alaska".to_string()),
            institution: Some("Smithsonian Institution".to_string()),
            ..Default::default()
        };
        let encoded = params.to_query().unwrap().encode();
        assert_eq!(
            encoded,
            "geo=Canada%7CAlaska&institution=Smithsonian+Institution&format=tsv"
        );
        assert!(!encoded.contains("taxon"));
        assert!(!encoded.contains("ids"));
    }

    #[test]
    fn test_no_filters_is_validation_error() {
        let err = SpecimenSearchParams::default().to_query().unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
        assert!(err.to_string().contains("at least one search filter"));
    }

    #[test]
    fn test_blank_filters_count_as_absent() {
        let params = SpecimenSearchParams {
            taxon: Some("   ".to_string()),
            geo: Some(String::new()),
            ..Default::default()
        };
        let err = params.to_query().unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[test]
    fn test_list_entries_are_trimmed() {
        let params = SpecimenSearchParams {
            ids: Some("ACRJP618-11 | ACRJP619-11".to_string()),
            ..Default::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.encode(), "ids=ACRJP618-11%7CACRJP619-11&format=tsv");
    }

    #[test]
    fn test_empty_list_entry_rejected() {
        let params = SpecimenSearchParams {
            geo: Some("Canada||Peru".to_string()),
            ..Default::default()
        };
        let err = params.to_query().unwrap_err();
        assert!(err.to_string().contains("empty pipe-delimited entry"));
    }

    #[test]
    fn test_bin_format_enforced() {
        let ok = SpecimenSearchParams {
            bin: Some("BOLD:AAA1234|BOLD:ACD5678".to_string()),
            ..Default::default()
        };
        assert!(ok.to_query().is_ok());

        let bad = SpecimenSearchParams {
            bin: Some("AAA1234".to_string()),
            ..Default::default()
        };
        let err = bad.to_query().unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
        assert!(err.to_string().contains("BIN URI"));
    }

    #[test]
    fn test_control_characters_rejected() {
        let params = SpecimenSearchParams {
            taxon: Some("Aves\nAmphibia".to_string()),
            ..Default::default()
        };
        assert!(params.to_query().is_err());
    }

    #[test]
    fn test_unknown_argument_rejected() {
        let value = serde_json::json!({"taxon": "Aves", "habitat": "forest"});
        let result: Result<SpecimenSearchParams, _> = serde_json::from_value(value);
        assert!(result.unwrap_err().to_string().contains("habitat"));
    }

    #[test]
    fn test_marker_rejected_on_specimen_search() {
        let value = serde_json::json!({"taxon": "Aves", "marker": "COI-5P"});
        let result: Result<SpecimenSearchParams, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_accepts_marker_as_only_filter() {
        let params = CombinedSearchParams {
            marker: Some("COI-5P".to_string()),
            ..Default::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.encode(), "marker=COI-5P&format=tsv");
    }

    #[test]
    fn test_include_sequence_defaults_to_false() {
        let value = serde_json::json!({"taxon": "Aves"});
        let params: CombinedSearchParams = serde_json::from_value(value).unwrap();
        assert!(!params.include_sequence);
    }

    #[test]
    fn test_include_sequence_dashed_alias() {
        let value = serde_json::json!({"taxon": "Aves", "include-sequence": true});
        let params: CombinedSearchParams = serde_json::from_value(value).unwrap();
        assert!(params.include_sequence);
    }

    #[test]
    fn test_format_always_pinned_to_tsv() {
        let params = CombinedSearchParams {
            taxon: Some("Aves".to_string()),
            include_sequence: true,
            ..Default::default()
        };
        assert!(params.to_query().unwrap().encode().ends_with("format=tsv"));
    }
}
