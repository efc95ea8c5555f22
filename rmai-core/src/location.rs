//! Location and resident records as served by the upstream dataset.
//!
//! Every field is optional on the wire. Absent or `null` fields deserialize to
//! their empty value so that downstream consumers (prompt builders, scorers)
//! never have to handle missing data.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A place in the dataset together with the characters living there.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Kind of place, e.g. `Planet` or `Space station`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dimension: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub residents: Vec<Resident>,
}

impl Location {
    /// Label used in selection lists: `name (type)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }

    /// Names of the first `limit` residents, in dataset order.
    pub fn resident_names(&self, limit: usize) -> impl Iterator<Item = &str> {
        self.residents.iter().take(limit).map(|r| r.name.as_str())
    }
}

/// A character living at a [`Location`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resident {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub species: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: Origin,
}

/// Where a [`Resident`] comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Origin {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_become_empty() {
        let location: Location = serde_json::from_value(serde_json::json!({
            "id": "3",
            "name": "Citadel of Ricks",
            "type": null,
            "residents": [{ "id": "8", "name": "Adjudicator Rick", "origin": null }]
        }))
        .unwrap();

        assert_eq!(location.kind, "");
        assert_eq!(location.dimension, "");
        assert_eq!(location.residents.len(), 1);
        assert_eq!(location.residents[0].origin.name, "");
        assert_eq!(location.residents[0].species, "");
    }

    #[test]
    fn type_field_round_trips_under_its_wire_name() {
        let location = Location {
            name: "Earth (C-137)".into(),
            kind: "Planet".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["type"], "Planet");
        assert_eq!(location.label(), "Earth (C-137) (Planet)");
    }

    #[test]
    fn resident_names_respects_limit() {
        let location = Location {
            residents: (0..5)
                .map(|i| Resident { name: format!("r{i}"), ..Default::default() })
                .collect(),
            ..Default::default()
        };
        let names: Vec<&str> = location.resident_names(3).collect();
        assert_eq!(names, vec!["r0", "r1", "r2"]);
    }
}
