//! Ground-truth summary of a location used to judge generated text.

use std::fmt;

use rmai_core::Location;

/// Residents listed on the rendered sheet.
pub const SHEET_RESIDENTS: usize = 12;

/// Residents whose names count as fact tokens.
pub const FACT_RESIDENTS: usize = 8;

/// Name, type, dimension and leading residents of one location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSheet {
    pub name: String,
    pub kind: String,
    pub dimension: String,
    /// At most [`SHEET_RESIDENTS`] names, in dataset order.
    pub residents: Vec<String>,
}

impl FactSheet {
    /// Resident names are kept as recorded; empty ones render as `?`.
    pub fn from_location(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            kind: location.kind.clone(),
            dimension: location.dimension.clone(),
            residents: location.resident_names(SHEET_RESIDENTS).map(str::to_string).collect(),
        }
    }

    /// Name, type, dimension and the first [`FACT_RESIDENTS`] resident names,
    /// without empty entries.
    pub fn fact_tokens(&self) -> Vec<&str> {
        [self.name.as_str(), self.kind.as_str(), self.dimension.as_str()]
            .into_iter()
            .chain(self.residents.iter().take(FACT_RESIDENTS).map(String::as_str))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Name, type and dimension, without empty entries.
    pub fn required_keywords(&self) -> Vec<&str> {
        [self.name.as_str(), self.kind.as_str(), self.dimension.as_str()]
            .into_iter()
            .filter(|keyword| !keyword.is_empty())
            .collect()
    }
}

impl fmt::Display for FactSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Location: {}. Type: {}. Dimension: {}. Residents: {}",
            self.name,
            self.kind,
            self.dimension,
            self.residents
                .iter()
                .map(|name| if name.is_empty() { "?" } else { name.as_str() })
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmai_core::Resident;

    fn location(residents: usize) -> Location {
        Location {
            name: "Anatomy Park".into(),
            kind: "Microverse".into(),
            dimension: String::new(),
            residents: (0..residents)
                .map(|i| Resident { name: format!("Resident {i}"), ..Default::default() })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn sheet_keeps_twelve_residents_and_tokens_keep_eight() {
        let sheet = FactSheet::from_location(&location(20));
        assert_eq!(sheet.residents.len(), 12);
        // name + type + 8 residents; empty dimension dropped
        assert_eq!(sheet.fact_tokens().len(), 10);
        assert_eq!(sheet.required_keywords(), vec!["Anatomy Park", "Microverse"]);
    }

    #[test]
    fn unnamed_residents_render_as_question_marks() {
        let mut place = location(2);
        place.residents[0].name.clear();
        let sheet = FactSheet::from_location(&place);
        assert!(sheet.to_string().ends_with("Residents: ?, Resident 1"));
        // still excluded from fact tokens
        assert_eq!(sheet.fact_tokens(), vec!["Anatomy Park", "Microverse", "Resident 1"]);
    }

    #[test]
    fn renders_every_field() {
        let sheet = FactSheet::from_location(&location(2));
        assert_eq!(
            sheet.to_string(),
            "Location: Anatomy Park. Type: Microverse. Dimension: . Residents: Resident 0, Resident 1"
        );
    }
}
