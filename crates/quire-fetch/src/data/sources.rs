use quire_core::model::{FileType, ResourceKind};

/// One file a user asked for, built transiently per download action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub resource_id: String,
    pub file_type: FileType,
    pub display_name: String,
}

impl DownloadTarget {
    pub fn new(
        resource_id: impl Into<String>,
        file_type: FileType,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            file_type,
            display_name: display_name.into(),
        }
    }

    /// Local file name the body is saved under.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .display_name
            .trim()
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
            .collect();
        let stem = if stem.is_empty() {
            self.resource_id.as_str()
        } else {
            stem.as_str()
        };
        format!("{stem}.{}", self.file_type.ext())
    }
}

/// Where a candidate URL points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Primary API binary endpoint.
    Api,
    /// Compatibility path kept for older deployments.
    Legacy,
    /// Third-party hosting of the same file, opened in the browser.
    Mirror,
}

/// One URL to attempt when fetching a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSource {
    pub url: String,
    pub kind: SourceKind,
}

impl DownloadSource {
    pub fn new(url: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// Build the ordered candidate list for one download action.
///
/// Fixed priority order: the primary download endpoint, the two legacy path
/// variants still served by older deployments, then the mirror if one is
/// known. The list is generated fresh per attempt and never reordered.
pub fn candidates(
    base_url: &str,
    kind: ResourceKind,
    target: &DownloadTarget,
    mirror: Option<&str>,
) -> Vec<DownloadSource> {
    let root = base_url.trim_end_matches('/');
    let coll = kind.segment();
    let id = &target.resource_id;
    let ext = target.file_type.ext();

    let mut list = vec![
        DownloadSource::new(
            format!("{root}/api/{coll}/{id}/download/{ext}"),
            SourceKind::Api,
        ),
        DownloadSource::new(
            format!("{root}/api/{coll}/{id}/direct-download/{ext}"),
            SourceKind::Legacy,
        ),
        DownloadSource::new(
            format!("{root}/direct-file/{coll}/{id}.{ext}"),
            SourceKind::Legacy,
        ),
    ];

    if let Some(mirror) = mirror {
        list.push(DownloadSource::new(
            attachment_url(mirror, target.file_type),
            SourceKind::Mirror,
        ));
    }

    list
}

/// Rewrite a Cloudinary PDF URL so the browser saves it instead of rendering
/// it inline. Other mirrors are passed through untouched.
pub fn attachment_url(mirror: &str, file_type: FileType) -> String {
    let is_cloudinary = mirror.contains("cloudinary.com");
    if is_cloudinary && file_type == FileType::Pdf && !mirror.contains("fl_attachment") {
        mirror.replacen("/upload/", "/upload/fl_attachment/", 1)
    } else {
        mirror.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> DownloadTarget {
        DownloadTarget::new("42", FileType::Pdf, "On Sorting")
    }

    #[test]
    fn candidate_order_is_fixed() {
        let list = candidates("http://localhost:5000/", ResourceKind::Journals, &target(), None);
        let urls: Vec<_> = list.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "http://localhost:5000/api/journals/42/download/pdf",
                "http://localhost:5000/api/journals/42/direct-download/pdf",
                "http://localhost:5000/direct-file/journals/42.pdf",
            ]
        );
        assert_eq!(list[0].kind, SourceKind::Api);
        assert_eq!(list[1].kind, SourceKind::Legacy);
        assert_eq!(list[2].kind, SourceKind::Legacy);
    }

    #[test]
    fn mirror_is_last() {
        let list = candidates(
            "http://localhost:5000",
            ResourceKind::Submissions,
            &target(),
            Some("https://cdn.example.org/42.pdf"),
        );
        assert_eq!(list.len(), 4);
        assert_eq!(list[3].kind, SourceKind::Mirror);
        assert_eq!(list[3].url, "https://cdn.example.org/42.pdf");
        assert!(list[0].url.contains("/api/submissions/42/download/pdf"));
    }

    #[test]
    fn cloudinary_pdf_gets_attachment_flag() {
        let url = "https://res.cloudinary.com/demo/raw/upload/v1/papers/42.pdf";
        assert_eq!(
            attachment_url(url, FileType::Pdf),
            "https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1/papers/42.pdf"
        );
        // already flagged or non-pdf stays untouched
        let flagged = "https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1/42.pdf";
        assert_eq!(attachment_url(flagged, FileType::Pdf), flagged);
        assert_eq!(attachment_url(url, FileType::Docx), url);
        assert_eq!(
            attachment_url("https://cdn.example.org/42.pdf", FileType::Pdf),
            "https://cdn.example.org/42.pdf"
        );
    }

    #[test]
    fn file_name_sanitizes_display_name() {
        let t = DownloadTarget::new("42", FileType::Docx, "Vol 2/Issue 4: Final");
        assert_eq!(t.file_name(), "Vol 2-Issue 4- Final.docx");

        let unnamed = DownloadTarget::new("42", FileType::Pdf, "");
        assert_eq!(unnamed.file_name(), "42.pdf");
    }
}
