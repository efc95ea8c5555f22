//! Plain-text rendering of command results.

use std::fmt::Write;

use rmai_core::{Location, Resident};
use rmai_eval::ScoreReport;
use rmai_notes::Note;
use rmai_rag::SearchResult;

pub fn format_locations(locations: &[Location]) -> String {
    locations.iter().map(Location::label).collect::<Vec<_>>().join("\n")
}

pub fn format_location_header(location: &Location) -> String {
    format!(
        "Location: {}\nType: {} • Dimension: {}",
        location.name, location.kind, location.dimension
    )
}

/// A resident's details followed by their notes.
pub fn format_resident(resident: &Resident, notes: &[Note]) -> String {
    let origin =
        if resident.origin.name.is_empty() { "Unknown" } else { resident.origin.name.as_str() };
    let mut out = format!(
        "{} [{}]\n  {} • {} • {}\n  Origin: {}",
        resident.name, resident.id, resident.species, resident.status, resident.gender, origin
    );
    for note in notes {
        let _ = write!(out, "\n  - {} ({})", note.content, note.created_at.to_rfc3339());
    }
    out
}

pub fn format_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes.".to_string();
    }
    notes
        .iter()
        .map(|n| format!("#{} {} [{}]: {}", n.id, n.character_name, n.character_id, n.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_summary(summary: &str, report: &ScoreReport) -> String {
    format!("{summary}\n\n{}", report.rounded(3))
}

pub fn format_search(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results.".to_string();
    }
    results
        .iter()
        .map(|r| {
            let who = r.document.provenance.as_deref().unwrap_or("?");
            format!("{who}: {}\n  score={:.3}", r.document.text, r.score)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmai_rag::Document;

    #[test]
    fn search_results_show_provenance_and_score() {
        let results = vec![SearchResult {
            document: Document::new("1", "Built the portal gun").with_provenance("Rick Sanchez"),
            score: 0.81234,
        }];
        assert_eq!(format_search(&results), "Rick Sanchez: Built the portal gun\n  score=0.812");
        assert_eq!(format_search(&[]), "No results.");
    }

    #[test]
    fn resident_without_origin_says_unknown() {
        let rick = Resident { id: "1".into(), name: "Rick".into(), ..Default::default() };
        assert!(format_resident(&rick, &[]).ends_with("Origin: Unknown"));
    }

    #[test]
    fn resident_lists_notes() {
        let rick = Resident { id: "1".into(), name: "Rick".into(), ..Default::default() };
        let note = Note {
            id: 7,
            character_id: "1".into(),
            character_name: "Rick".into(),
            content: "Hates the Citadel".into(),
            embedding: None,
            created_at: chrono::Utc::now(),
        };
        assert!(format_resident(&rick, &[note]).contains("\n  - Hates the Citadel ("));
    }

    #[test]
    fn summary_is_followed_by_rounded_scores() {
        let report = ScoreReport::from_axes(0.75, 0.5, 1.0, 0.12345);
        let text = format_summary("Welcome.", &report);
        assert!(text.starts_with("Welcome.\n\nconsistency=0.750"));
        assert!(text.contains("grounding=0.123"));
    }
}
