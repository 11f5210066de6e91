//! Custom serde helpers for the API's wire formats.

/// `Option<f64>` carried as a JSON string, e.g. `"amount": "12.50"`.
///
/// Use together with `default` and `skip_serializing_if = "Option::is_none"`
/// so that an unset value is omitted and a missing field decodes to `None`.
pub mod option_f64_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| D::Error::custom(format!("invalid decimal string {raw:?}: {e}")))
            })
            .transpose()
    }
}
