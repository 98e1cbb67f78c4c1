#![deny(missing_docs)]
//! Declarative, typesafe extraction of a serde payload embedded inside a
//! string parameter. The canonical case is a json document carried inside a
//! single query parameter (e.g. an oauth `state` value): the outer request is
//! urlencoded, the inner value is json, and the two encodings should not know
//! about each other. See tests for usage.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;


/// A codec between a string and a concrete type `T`.
pub trait Codec<T> {
    /// the error type returned from this codec
    type Err;
    /// Attempt to parse a string into the target type `T`
    fn decode(raw: &str) -> Result<T, Self::Err>;
    /// Attempt to render the target type `T` into a string
    fn encode(value: &T) -> Result<String, Self::Err>;
}

/// unit struct which indicates a string is json encoded
#[derive(Debug)]
pub struct Json;

impl<T> Codec<T> for Json
where
    for<'de> T: Serialize + Deserialize<'de>,
{
    type Err = serde_json::Error;

    fn decode(raw: &str) -> Result<T, Self::Err> {
        serde_json::from_str(raw)
    }

    fn encode(value: &T) -> Result<String, Self::Err> {
        serde_json::to_string(value)
    }
}

/// A string field that is really an alternative encoding of a `T`.
///
/// Deserializing the outer structure never eagerly parses the inner payload;
/// [Packed::decode] surfaces the codec error at the point of use.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Packed<T, C> {
    raw: String,
    #[serde(skip)]
    expected: PhantomData<T>,
    #[serde(skip)]
    codec: PhantomData<C>,
}

impl<T, C> Packed<T, C>
where
    C: Codec<T>,
{
    /// Encode `value` with the codec `C` and wrap the resulting string
    pub fn new(value: &T) -> Result<Self, C::Err> {
        let raw = C::encode(value)?;
        Ok(Packed {
            raw,
            expected: PhantomData,
            codec: PhantomData,
        })
    }

    /// Try to unwrap the inner type using the stored string and the codec
    pub fn decode(self) -> Result<T, C::Err> {
        C::decode(&self.raw)
    }

    /// Encode `value` straight to the wire string, without the wrapper.
    /// Useful when the string is appended to a url by hand.
    pub fn encode_to_string(value: &T) -> Result<String, C::Err> {
        C::encode(value)
    }
}

/// A type which indicates a json encoded `T`
pub type JsonPacked<T> = Packed<T, Json>;
