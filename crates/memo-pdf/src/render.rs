//! Per-document renderers.
//!
//! Each renderer is a pure function from the saved record (plus case and
//! accused snapshots) to PDF bytes. Field labels sit at the left margin,
//! values at a fixed x offset; itemized lists print one row per item and
//! rely on the composer for page breaks.

use case_types::{
    AccusedSnapshot, ArrestFields, BnssChecklistFields, CaseSnapshot, ChallanFields,
    CourtForwardingFields, MedicalFields, MemoKind, PersonalSearchFields, SeizureFields,
};
use workflow_engine::{grounds_catalog, AccusedDocuments, DocState};

use crate::error::MemoPdfError;
use crate::layout::{Composer, LEFT_MARGIN};

const ORG_NAME: &str = "RAILWAY PROTECTION FORCE";
const VALUE_X: f64 = 230.0;
const ITEM_ROW_HEIGHT: f64 = 14.0;

fn header(c: &mut Composer, title: &str, case: &CaseSnapshot) {
    c.line(LEFT_MARGIN, 14.0, true, ORG_NAME);
    c.line(LEFT_MARGIN, 12.0, true, title);
    c.rule();
    field(c, "Case No.", &case.case_number);
    field(c, "Date", &case.registered_at.format("%d-%m-%Y").to_string());
    field(c, "Railway Post", &case.railway_post);
    field(c, "Section of Law", &case.law_section);
    if let Some(fir) = &case.fir_number {
        field(c, "FIR No.", fir);
    }
    c.rule();
}

fn field(c: &mut Composer, label: &str, value: &str) {
    c.ensure_room(12.0);
    let y = c.y();
    c.text_at(LEFT_MARGIN, y, 10.0, true, label);
    c.text_at(VALUE_X, y, 10.0, false, value);
    c.advance(16.0);
}

fn accused_block(c: &mut Composer, accused: &AccusedSnapshot) {
    field(c, "Accused", &accused.name);
    field(c, "Parentage", &accused.parentage);
    field(c, "Address", &accused.address);
    field(c, "Age / Gender", &format!("{} / {}", accused.age, accused.gender));
    c.rule();
}

fn remarks(c: &mut Composer, text: &str) {
    if !text.is_empty() {
        field(c, "Remarks", text);
    }
}

/// Embedded signature image, or a text placeholder when the image is
/// absent or fails to decode.
fn signature_block(c: &mut Composer, caption: &str, png: Option<&[u8]>) {
    c.ensure_room(96.0);
    let base = c.y();
    let drawn = match png {
        Some(data) => c.image_at(LEFT_MARGIN, base - 50.0, 140.0, 46.0, data).is_ok(),
        None => false,
    };
    if !drawn {
        c.text_at(LEFT_MARGIN, base - 30.0, 10.0, false, "(signature not captured)");
    }
    c.advance(58.0);
    c.line(LEFT_MARGIN, 10.0, true, caption);
    c.advance(6.0);
}

pub fn render_seizure(
    case: &CaseSnapshot,
    accused: &AccusedSnapshot,
    fields: &SeizureFields,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, MemoKind::Seizure.title(), case);
    accused_block(&mut c, accused);
    field(&mut c, "Place of Seizure", &fields.place_of_seizure);
    field(&mut c, "Seized From", &fields.seized_from);
    for (i, witness) in fields.witnesses.iter().enumerate() {
        field(&mut c, &format!("Witness {}", i + 1), witness);
    }
    c.advance(6.0);
    c.line(LEFT_MARGIN, 11.0, true, "Articles Seized");
    for (i, item) in fields.items.iter().enumerate() {
        c.ensure_room(ITEM_ROW_HEIGHT);
        let y = c.y();
        c.text_at(LEFT_MARGIN, y, 10.0, false, &format!("{}.", i + 1));
        c.text_at(LEFT_MARGIN + 24.0, y, 10.0, false, &item.description);
        c.text_at(400.0, y, 10.0, false, &format!("Qty: {}", item.quantity));
        c.text_at(470.0, y, 10.0, false, &format!("Rs. {:.2}", item.estimated_value));
        c.advance(ITEM_ROW_HEIGHT);
    }
    remarks(&mut c, &fields.remarks);
    signature_block(&mut c, "Signature of Seizing Officer", signature);
    c.finish()
}

pub fn render_arrest(
    case: &CaseSnapshot,
    accused: &AccusedSnapshot,
    fields: &ArrestFields,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, MemoKind::Arrest.title(), case);
    accused_block(&mut c, accused);
    field(&mut c, "Place of Arrest", &fields.place_of_arrest);
    field(&mut c, "Date & Time of Arrest", &fields.arrest_datetime);
    field(&mut c, "Arresting Officer", &fields.arresting_officer);
    field(&mut c, "Grounds of Arrest", &fields.grounds_summary);
    remarks(&mut c, &fields.remarks);
    signature_block(&mut c, "Signature of Arresting Officer", signature);
    c.finish()
}

pub fn render_personal_search(
    case: &CaseSnapshot,
    accused: &AccusedSnapshot,
    fields: &PersonalSearchFields,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, MemoKind::PersonalSearch.title(), case);
    accused_block(&mut c, accused);
    field(&mut c, "Place of Search", &fields.place_of_search);
    field(&mut c, "Conducted By", &fields.conducted_by);
    for (i, witness) in fields.witnesses.iter().enumerate() {
        field(&mut c, &format!("Witness {}", i + 1), witness);
    }
    c.advance(6.0);
    c.line(LEFT_MARGIN, 11.0, true, "Articles Found");
    if fields.items.is_empty() {
        c.line(LEFT_MARGIN, 10.0, false, "Nil");
    }
    for (i, item) in fields.items.iter().enumerate() {
        c.ensure_room(ITEM_ROW_HEIGHT);
        let y = c.y();
        c.text_at(LEFT_MARGIN, y, 10.0, false, &format!("{}.", i + 1));
        c.text_at(LEFT_MARGIN + 24.0, y, 10.0, false, &item.description);
        c.text_at(400.0, y, 10.0, false, &format!("Qty: {}", item.quantity));
        c.advance(ITEM_ROW_HEIGHT);
    }
    remarks(&mut c, &fields.remarks);
    signature_block(&mut c, "Signature of Searching Officer", signature);
    c.finish()
}

pub fn render_medical(
    case: &CaseSnapshot,
    accused: &AccusedSnapshot,
    fields: &MedicalFields,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, MemoKind::Medical.title(), case);
    accused_block(&mut c, accused);
    field(&mut c, "Hospital", &fields.hospital);
    field(&mut c, "Examined By", &fields.examined_by);
    field(&mut c, "Examined At", &fields.examined_at);
    field(
        &mut c,
        "Injuries Noted",
        if fields.injuries_noted.is_empty() {
            "None"
        } else {
            fields.injuries_noted.as_str()
        },
    );
    field(
        &mut c,
        "Fit for Custody",
        if fields.fit_for_custody { "Yes" } else { "No" },
    );
    remarks(&mut c, &fields.remarks);
    signature_block(&mut c, "Signature of Medical Officer", signature);
    c.finish()
}

pub fn render_bnss_checklist(
    case: &CaseSnapshot,
    accused: &AccusedSnapshot,
    fields: &BnssChecklistFields,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, MemoKind::BnssChecklist.title(), case);
    accused_block(&mut c, accused);
    c.line(LEFT_MARGIN, 11.0, true, "Grounds of Arrest");
    for ground in grounds_catalog() {
        let checked = fields.grounds_checked.iter().any(|id| id == ground.id);
        let mark = if checked { "[X]" } else { "[ ]" };
        let suffix = if ground.mandatory { " *" } else { "" };
        c.ensure_room(ITEM_ROW_HEIGHT);
        let y = c.y();
        c.text_at(LEFT_MARGIN, y, 10.0, false, mark);
        c.text_at(
            LEFT_MARGIN + 28.0,
            y,
            10.0,
            false,
            &format!("{}{}", ground.label, suffix),
        );
        c.advance(ITEM_ROW_HEIGHT);
    }
    c.line(LEFT_MARGIN, 8.0, false, "* mandatory ground");
    c.advance(4.0);
    field(&mut c, "Person Informed", &fields.person_informed);
    field(&mut c, "Relation to Accused", &fields.relation_to_accused);
    remarks(&mut c, &fields.remarks);
    signature_block(&mut c, "Signature of Officer", signature);
    c.finish()
}

pub fn render_court_forwarding(
    case: &CaseSnapshot,
    accused: &AccusedSnapshot,
    fields: &CourtForwardingFields,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, MemoKind::CourtForwarding.title(), case);
    accused_block(&mut c, accused);
    field(&mut c, "Court", &fields.court_name);
    field(&mut c, "Forwarded On", &fields.forwarding_datetime);
    field(&mut c, "Escorting Officer", &fields.escorting_officer);
    c.advance(6.0);
    c.line(LEFT_MARGIN, 11.0, true, "Documents Enclosed");
    for (i, doc) in fields.documents_enclosed.iter().enumerate() {
        c.line(LEFT_MARGIN, 10.0, false, &format!("{}. {}", i + 1, doc));
    }
    remarks(&mut c, &fields.remarks);
    signature_block(&mut c, "Signature of Forwarding Officer", signature);
    c.finish()
}

fn doc_state_mark(state: DocState) -> &'static str {
    match state {
        DocState::Complete => "Complete",
        DocState::Draft => "Draft",
        DocState::Missing => "Missing",
    }
}

/// Case-level challan: memo completion summary for every accused plus the
/// forwarding particulars.
pub fn render_challan(
    case: &CaseSnapshot,
    fields: &ChallanFields,
    accused: &[(AccusedSnapshot, AccusedDocuments)],
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, MemoPdfError> {
    let mut c = Composer::new();
    header(&mut c, "Challan", case);
    field(&mut c, "Court", &fields.court_name);
    field(&mut c, "Investigating Officer", &fields.investigating_officer);
    field(&mut c, "Brief Facts", &fields.brief_facts);
    for (i, witness) in fields.witnesses.iter().enumerate() {
        field(&mut c, &format!("Prosecution Witness {}", i + 1), witness);
    }
    c.rule();
    c.line(LEFT_MARGIN, 11.0, true, "Accused and Documentation Status");
    for (i, (snapshot, docs)) in accused.iter().enumerate() {
        c.ensure_room(24.0 + MemoKind::REQUIRED_FOR_CHALLAN.len() as f64 * ITEM_ROW_HEIGHT);
        c.line(
            LEFT_MARGIN,
            10.0,
            true,
            &format!("{}. {} ({})", i + 1, snapshot.name, snapshot.parentage),
        );
        for kind in MemoKind::REQUIRED_FOR_CHALLAN {
            let y = c.y();
            c.text_at(LEFT_MARGIN + 24.0, y, 10.0, false, kind.title());
            c.text_at(420.0, y, 10.0, false, doc_state_mark(docs.state(kind)));
            c.advance(ITEM_ROW_HEIGHT);
        }
        c.advance(4.0);
    }
    signature_block(&mut c, "Signature of Investigating Officer", signature);
    c.finish()
}
