//! Prompt wording and the offline templates used when no model answers.

use rmai_core::{Location, Resident};

/// System message sent with every chat request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a witty, sardonic Rick & Morty narrator who keeps facts accurate.";

/// How many residents a summary prompt names.
pub const SUMMARY_RESIDENTS: usize = 8;

fn or_placeholder<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn notable_residents(location: &Location) -> String {
    location
        .resident_names(SUMMARY_RESIDENTS)
        .map(|name| or_placeholder(name, "?"))
        .collect::<Vec<_>>()
        .join(", ")
}

struct LocationFacts<'a> {
    name: &'a str,
    kind: &'a str,
    dimension: &'a str,
    residents: String,
}

impl<'a> LocationFacts<'a> {
    fn of(location: &'a Location) -> Self {
        Self {
            name: or_placeholder(&location.name, "Unknown Location"),
            kind: or_placeholder(&location.kind, "Unknown Type"),
            dimension: or_placeholder(&location.dimension, "Unknown Dimension"),
            residents: notable_residents(location),
        }
    }
}

pub fn summary_prompt(location: &Location) -> String {
    let facts = LocationFacts::of(location);
    format!(
        "Summarize the location '{}' in 4-6 sentences in the style of a Rick & Morty narrator. \
         Keep facts accurate. Mention its type ('{}'), dimension ('{}'), and give a sense of \
         notable residents (e.g., {}).",
        facts.name, facts.kind, facts.dimension, facts.residents
    )
}

pub fn summary_template(location: &Location) -> String {
    let facts = LocationFacts::of(location);
    let residents =
        if facts.residents.is_empty() { "the usual suspects" } else { facts.residents.as_str() };
    [
        format!(
            "Welcome to {}, a {} tucked inside the {}.",
            facts.name,
            facts.kind.to_lowercase(),
            facts.dimension
        ),
        "It's exactly the kind of place where portal mistakes feel intentional.".to_string(),
        format!("Locals range from the polite to the gelatinous: {residents}."),
        "If you hear belching, that's just the ambiance. If you hear screaming, that's also the \
         ambiance."
            .to_string(),
        "Anyway, watch your step. Gravity is more of a suggestion around here.".to_string(),
    ]
    .join(" ")
}

fn speaker<'a>(resident: &'a Resident, fallback: &'a str) -> (&'a str, &'a str) {
    (or_placeholder(&resident.name, fallback), or_placeholder(&resident.species, "?"))
}

pub fn dialogue_prompt(a: &Resident, b: &Resident) -> String {
    let (n1, s1) = speaker(a, "Character A");
    let (n2, s2) = speaker(b, "Character B");
    format!(
        "Write a playful 6-8 line dialogue between {n1} (species: {s1}) and {n2} (species: {s2}). \
         Keep it witty and on-brand for Rick & Morty, without violating safety policies."
    )
}

/// Fixed six-line exchange between the two characters.
pub fn dialogue_template(a: &Resident, b: &Resident) -> String {
    let (n1, s1) = speaker(a, "Character A");
    let (n2, s2) = speaker(b, "Character B");
    format!(
        "{n1}: You ever feel like someone's binge-watching our lives?\n\
         {n2}: Only when I'm interesting. So, never.\n\
         {n1}: I'm {s1}, interesting is my species trait.\n\
         {n2}: I'm {s2}. My trait is surviving monologues.\n\
         {n1}: Wanna grab a portal and regret it?\n\
         {n2}: Regret is my cardio. Let's go."
    )
}
