//! Free-form note helpers shared by runs and ledger entries.

/// Appends `note` as a new paragraph.
pub(crate) fn append_note(notes: &mut Option<String>, note: &str) {
    *notes = Some(match notes.take() {
        Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, note),
        _ => note.to_string(),
    });
}

/// Trims a note, mapping blank input to `None`.
pub(crate) fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
