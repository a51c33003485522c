//! Named field accessors.
//!
//! The pipeline is generic over the record type and never looks inside a
//! record except through the fields a card declares. A `Field` pairs a name
//! with a function returning the field's string representation.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Function reading one field of a record as text (`None` = absent).
pub type FieldGetter<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// A named field of a record type `T`.
pub struct Field<T> {
    name: String,
    getter: FieldGetter<T>,
}

impl<T> Field<T> {
    /// Create a field from a name and a getter.
    ///
    /// # Example
    /// ```ignore
    /// let cluster = Field::new("cluster", |pod: &Pod| Some(pod.cluster.clone()));
    /// ```
    pub fn new(
        name: impl Into<String>,
        getter: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            getter: Arc::new(getter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// String representation of this field on `item`.
    pub fn value(&self, item: &T) -> Option<String> {
        (self.getter)(item)
    }

    /// Case-insensitive substring test; `query` must already be lowercased.
    pub fn contains(&self, item: &T, query: &str) -> bool {
        self.value(item)
            .is_some_and(|value| value.to_lowercase().contains(query))
    }
}

impl Field<Value> {
    /// Field of a JSON record, addressed by key.
    ///
    /// Dots descend into nested objects (`"metadata.namespace"`). Strings are
    /// returned verbatim, other scalars as their JSON text, `null` and
    /// missing keys as `None`.
    pub fn key(path: impl Into<String>) -> Self {
        let path = path.into();
        let pointer: String = path
            .split('.')
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect();

        Self::new(path, move |record: &Value| match record.pointer(&pointer) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        })
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: self.getter.clone(),
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_key_field() {
        let pod = json!({
            "name": "api-7f9c",
            "restarts": 4,
            "ready": true,
            "node": null,
            "metadata": {"namespace": "payments"}
        });

        assert_eq!(Field::key("name").value(&pod).as_deref(), Some("api-7f9c"));
        assert_eq!(Field::key("restarts").value(&pod).as_deref(), Some("4"));
        assert_eq!(Field::key("ready").value(&pod).as_deref(), Some("true"));
        assert_eq!(Field::key("node").value(&pod), None);
        assert_eq!(Field::key("missing").value(&pod), None);
        assert_eq!(
            Field::key("metadata.namespace").value(&pod).as_deref(),
            Some("payments")
        );
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let field = Field::new("name", |s: &String| Some(s.clone()));
        let item = "CoreDNS-abc".to_string();
        assert!(field.contains(&item, "coredns"));
        assert!(!field.contains(&item, "nginx"));
    }
}
