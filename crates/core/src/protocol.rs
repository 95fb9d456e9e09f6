//! Wire constants shared by the report service and the collector.

/// Submission endpoint. Takes an optional `offset` query parameter.
pub const REQUEST_REPORT_PATH: &str = "/request_report";

/// Lookup endpoint prefix. The ticket follows as the last path segment.
pub const GET_REPORT_PATH: &str = "/get_report";

/// Query parameter carrying the resumption offset.
pub const OFFSET_PARAM: &str = "offset";

/// Body returned by a lookup while the service is overloaded.
pub const NOT_READY_BODY: &str = "report is not ready";

/// Content type of a ready report.
pub const REPORT_CONTENT_TYPE: &str = "text/csv";

/// `Content-Disposition` value for a report attachment.
pub fn attachment_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name)
}

/// Extract the filename from a `Content-Disposition` header value.
pub fn disposition_file_name(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
