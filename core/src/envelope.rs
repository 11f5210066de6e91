//! The `{"data": .., "actions": ..}` envelope wrapping every API response.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Response envelope. `data` is mandatory; `actions` is only present on
/// resources that offer follow-up operations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseData<D, A = serde_json::Value> {
    pub data: D,
    #[serde(default = "Option::default")]
    pub actions: Option<A>,
}

/// Decode a raw response body into an envelope.
pub fn decode<D, A>(body: &str) -> Result<ResponseData<D, A>>
where
    D: DeserializeOwned,
    A: DeserializeOwned,
{
    serde_json::from_str(body).map_err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Actions {
        release_url: Option<String>,
    }

    #[test]
    fn decodes_data_and_actions() {
        let env: ResponseData<Item, Actions> =
            decode(r#"{"data":{"name":"foo"},"actions":{"release_url":"bar"}}"#).unwrap();
        assert_eq!(env.data.name.as_deref(), Some("foo"));
        assert_eq!(env.actions.unwrap().release_url.as_deref(), Some("bar"));
    }

    #[test]
    fn actions_are_optional() {
        let env: ResponseData<Item> = decode(r#"{"data":{"name":"foo"}}"#).unwrap();
        assert!(env.actions.is_none());

        let env: ResponseData<Item, Actions> = decode(r#"{"data":{},"actions":null}"#).unwrap();
        assert_eq!(env.data, Item { name: None });
        assert!(env.actions.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let env: ResponseData<Item, Value> = decode(r#"{"data":{"name":"x","extra":1},"meta":{}}"#).unwrap();
        assert_eq!(env.data.name.as_deref(), Some("x"));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode::<Item, Value>("Success!").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn type_mismatch_is_a_decode_error() {
        let err = decode::<Item, Value>(r#"{"data":{"name":5}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        let err = decode::<Item, Value>(r#"{"actions":{}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
