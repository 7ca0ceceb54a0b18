//! Domain records, request models, response models and converters.
//!
//! Every entity module follows the same shape:
//!
//! - a `FromRow` domain record mirroring the table,
//! - `Create*` / `Update*` request models deserialized from JSON and
//!   validated with `validator`,
//! - a `*Response` projection with only externally safe fields,
//! - pure converters: `Create*::to_domain(&self, context)`,
//!   `Update*::apply_to(&self, &mut record)` and `From<Record> for *Response`.
//!
//! Converters never fail and never touch the database.

pub mod chat;
pub mod favourite;
pub mod keeper;
pub mod message;
pub mod post;
pub mod report;
pub mod review;
pub mod role;
pub mod seeker;
pub mod session;
pub mod user;
pub mod vet;

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of a partial update.
///
/// Paired with `#[serde(default)]`: an omitted key stays `None` (keep the
/// stored value) while an explicit `null` becomes `Some(None)` (clear it).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `target` when the patch value is present.
pub(crate) fn patch<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::double_option")]
        city: Option<Option<String>>,
    }

    #[test]
    fn omitted_key_is_none() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.city, None);
    }

    #[test]
    fn explicit_null_clears() {
        let p: Patch = serde_json::from_str(r#"{"city": null}"#).unwrap();
        assert_eq!(p.city, Some(None));
    }

    #[test]
    fn value_sets() {
        let p: Patch = serde_json::from_str(r#"{"city": "Kazan"}"#).unwrap();
        assert_eq!(p.city, Some(Some("Kazan".to_string())));
    }
}
