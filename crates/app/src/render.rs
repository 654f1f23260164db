//! Text rendering of the current photo and the assignment list.
//!
//! Pure functions returning strings; printing is left to the caller.

use std::fmt::Write as _;

use pawpal_core::{AssignmentLedger, PhotoRecord};

use crate::session::AssignBlock;

/// The photo waiting to be assigned.
pub fn current_photo(photo: &PhotoRecord, width: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current photo: {}", photo.sized_url(width));
    if let Some(height) = photo.display_height(width) {
        let _ = writeln!(out, "  {width}x{height}");
    }
    let _ = writeln!(out, "  {}", describe(photo));
    let _ = write!(out, "  {} <{}>", photo.credit(), photo.creator_url());
    out
}

/// One email and every photo assigned to it.
pub fn assignment_entry(email: &str, photos: &[PhotoRecord], thumb_width: u32) -> String {
    let noun = if photos.len() == 1 { "photo" } else { "photos" };
    let mut out = format!("{email} ({} {noun})", photos.len());
    for photo in photos {
        let _ = write!(
            out,
            "\n  - {} ({}) {}",
            photo.sized_url(thumb_width),
            describe(photo),
            photo.credit()
        );
    }
    out
}

/// Every assignment, in the order emails were first assigned.
pub fn assignment_list(ledger: &AssignmentLedger, thumb_width: u32) -> String {
    if ledger.is_empty() {
        return "No assignments yet.".to_string();
    }
    ledger
        .iter()
        .map(|(email, photos)| assignment_entry(email, photos, thumb_width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt shown before each input line.
pub fn prompt(blocked_by: &[AssignBlock]) -> String {
    if blocked_by.is_empty() {
        return "> ".to_string();
    }
    let reasons: Vec<String> = blocked_by.iter().map(ToString::to_string).collect();
    format!("[assign disabled: {}] > ", reasons.join(", "))
}

fn describe(photo: &PhotoRecord) -> &str {
    match photo.alt_text() {
        "" => "no description",
        text => text,
    }
}
