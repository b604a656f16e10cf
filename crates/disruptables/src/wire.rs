//! Serde support for [`Try`], enabled by the `serde` feature.
//!
//! The wire form is an externally tagged map: `{"success": <value>}` or
//! `{"failure": "<error message>"}`. A captured error does not survive the
//! trip as its original kind; a deserialized failure carries a
//! [`Message`](crate::Message) with the same text.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::outcome::Try;

#[derive(Deserialize)]
#[serde(rename = "Try", rename_all = "lowercase")]
enum Wire<T> {
    Success(T),
    Failure(String),
}

impl<T: Serialize> Serialize for Try<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Try::Success(value) => serializer.serialize_newtype_variant("Try", 0, "success", value),
            Try::Failure(error) => {
                serializer.serialize_newtype_variant("Try", 1, "failure", &error.to_string())
            }
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Try<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Wire::<T>::deserialize(deserializer)? {
            Wire::Success(value) => Try::Success(value),
            Wire::Failure(message) => Try::Failure(Error::msg(message)),
        })
    }
}
