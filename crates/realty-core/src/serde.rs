use serde::{Deserialize, Deserializer};

/// Treats missing, empty and whitespace-only strings as `None` and trims the rest.
///
/// Query strings such as `?city=&bhkType=2BHK` arrive with empty values for
/// fields the client left blank.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accepts either a single string or a list of strings.
pub fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        city: Option<String>,
    }

    #[derive(Deserialize)]
    struct Amenities {
        #[serde(default, deserialize_with = "string_or_seq")]
        amenities: Vec<String>,
    }

    #[test]
    fn blank_strings_become_none() {
        let q: Query = serde_json::from_str(r#"{"city": "   "}"#).unwrap();
        assert!(q.city.is_none());

        let q: Query = serde_json::from_str(r#"{}"#).unwrap();
        assert!(q.city.is_none());

        let q: Query = serde_json::from_str(r#"{"city": " Pune "}"#).unwrap();
        assert_eq!(q.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn single_value_becomes_list() {
        let a: Amenities = serde_json::from_str(r#"{"amenities": "Lift"}"#).unwrap();
        assert_eq!(a.amenities, vec!["Lift"]);

        let a: Amenities = serde_json::from_str(r#"{"amenities": ["Lift", "Gym"]}"#).unwrap();
        assert_eq!(a.amenities, vec!["Lift", "Gym"]);

        let a: Amenities = serde_json::from_str(r#"{"amenities": null}"#).unwrap();
        assert!(a.amenities.is_empty());
    }
}
