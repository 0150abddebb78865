/*
 * attr.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub fn empty_attr() -> Attr {
    Attr::default()
}

tuple_node! {
    /// Element attributes: identifier, classes and ordered key-value pairs.
    ///
    /// Encoded by Pandoc as `[id, [classes], [[key, value], ...]]`. Key order
    /// is significant for round-tripping, so pairs are kept in a `Vec`.
    #[derive(Default, Eq)]
    pub struct Attr {
        pub identifier: String,
        pub classes: Vec<String>,
        pub attributes: Vec<(String, String)>,
    }
}

impl Attr {
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Attr {
            classes: classes.into_iter().map(Into::into).collect(),
            ..Attr::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of the first attribute named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, replacing an existing entry in place so the
    /// attribute order stays stable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((key, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attr_json_shape() {
        let attr = Attr {
            identifier: "fig".to_string(),
            classes: vec!["a".to_string(), "b".to_string()],
            attributes: vec![("k".to_string(), "v".to_string())],
        };
        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(value, json!(["fig", ["a", "b"], [["k", "v"]]]));

        let back: Attr = serde_json::from_value(value).unwrap();
        assert_eq!(back, attr);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut attr = Attr::default();
        attr.set("style", "color:red");
        attr.set("width", "50%");
        attr.set("style", "color:blue");
        assert_eq!(
            attr.attributes,
            vec![
                ("style".to_string(), "color:blue".to_string()),
                ("width".to_string(), "50%".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_and_has_class() {
        let mut attr = Attr::with_classes(["mermaid"]);
        attr.set("caption", "Flow");
        assert!(attr.has_class("mermaid"));
        assert!(!attr.has_class("graphviz"));
        assert_eq!(attr.get("caption"), Some("Flow"));
        assert_eq!(attr.get("missing"), None);
    }

    #[test]
    fn test_empty_attr() {
        assert_eq!(serde_json::to_value(empty_attr()).unwrap(), json!(["", [], []]));
    }
}
