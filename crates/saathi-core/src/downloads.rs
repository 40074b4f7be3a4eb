//! Downloaded-files log.
//!
//! Every generated export (report, PDF) is recorded here so users can see
//! what was produced and when. The list is append-only and newest-first;
//! entries can be pruned individually or cleared wholesale.

use serde::{Deserialize, Serialize};

/// A record of a generated export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedFile {
    pub id: String,
    pub file_name: String,
    /// Free-text label such as "PDF Report" or "Text Report".
    pub file_kind: String,
    pub activity_id: String,
    pub activity_name: String,
    /// Human-readable download date, e.g. "12 Mar 2024, 14:05".
    pub downloaded_at: String,
}

/// Input for recording a new download; the store assigns id and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDownloadedFile {
    pub file_name: String,
    pub file_kind: String,
    pub activity_id: String,
    pub activity_name: String,
}

impl DownloadedFile {
    /// Builds a full record from the caller-supplied fields.
    pub fn from_new(id: impl Into<String>, record: NewDownloadedFile, downloaded_at: String) -> Self {
        Self {
            id: id.into(),
            file_name: record.file_name,
            file_kind: record.file_kind,
            activity_id: record.activity_id,
            activity_name: record.activity_name,
            downloaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_carries_fields() {
        let record = NewDownloadedFile {
            file_name: "health-camp.pdf".to_string(),
            file_kind: "PDF Report".to_string(),
            activity_id: "a-1".to_string(),
            activity_name: "Health Camp".to_string(),
        };
        let file = DownloadedFile::from_new("dl-1", record, "12 Mar 2024, 14:05".to_string());
        assert_eq!(file.id, "dl-1");
        assert_eq!(file.activity_name, "Health Camp");
        assert_eq!(file.downloaded_at, "12 Mar 2024, 14:05");
    }
}
