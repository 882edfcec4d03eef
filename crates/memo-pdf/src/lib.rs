//! Fixed-layout PDF generation for case memos.
//!
//! One renderer per document type: each takes the saved form record plus
//! case and accused snapshots and lays the fields out at fixed coordinates
//! using lopdf. The only dynamic behavior is a page break when the running
//! y-cursor crosses the bottom margin.

pub mod error;
pub mod layout;
pub mod render;

pub use error::MemoPdfError;
pub use layout::Composer;
pub use render::{
    render_arrest, render_bnss_checklist, render_challan, render_court_forwarding,
    render_medical, render_personal_search, render_seizure,
};

/// Download filename for a generated document, e.g.
/// `SeizureMemo_RPF-2024-0137.pdf` for case number `RPF/2024/0137`.
pub fn download_filename(file_label: &str, case_number: &str) -> String {
    format!("{}_{}.pdf", file_label, case_number.replace('/', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_slashes() {
        assert_eq!(
            download_filename("SeizureMemo", "RPF/2024/0137"),
            "SeizureMemo_RPF-2024-0137.pdf"
        );
    }

    #[test]
    fn filename_without_slashes_is_untouched() {
        assert_eq!(download_filename("Challan", "CR-17"), "Challan_CR-17.pdf");
    }
}
