pub mod numeric;
pub mod resolver;
pub mod schema;

use serde_json::{Map, Value};

pub use numeric::{parse_clean_number, parse_clean_str};
pub use resolver::{resolve, resolve_number, resolve_str};
pub use schema::{FieldSpec, ListingField, ListingFieldParseError};

/// A record the resolver can read: a handful of declared fields plus an
/// open-ended extra-data bag.
pub trait FieldSource {
    fn declared(&self, key: &str) -> Option<Value>;
    fn extra(&self) -> &Map<String, Value>;
}
