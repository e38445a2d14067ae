use okitakoy_common::{Error, ModelDescriptor, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Models offered in the chat UI: (key, display name, provider)
pub const BUILTIN_MODELS: &[(&str, &str, &str)] = &[
    ("gpt4", "GPT-4", "OpenAI"),
    ("gpt35", "GPT-3.5 Turbo", "OpenAI"),
    ("claude", "Claude 3", "Anthropic"),
    ("claude_opus", "Claude 3 Opus", "Anthropic"),
    ("gemini", "Gemini Pro", "Google"),
    ("gemini_ultra", "Gemini Ultra", "Google"),
    ("llama", "Llama 3.1", "Meta"),
    ("llama70b", "Llama 3.1 70B", "Meta"),
    ("mistral", "Mistral Large", "Mistral AI"),
    ("deepseek", "DeepSeek V3", "DeepSeek"),
    ("cohere", "Cohere Command", "Cohere"),
    ("okitakoy", "Okitakoy AI", "Okitakoy Inc."),
];

/// Keyed model catalog that remembers declaration order.
///
/// Serializes as a JSON object whose keys appear in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    entries: Vec<(String, ModelDescriptor)>,
    index: HashMap<String, usize>,
}

impl ModelCatalog {
    /// The fixed catalog published to the frontend
    pub fn builtin() -> Self {
        let mut catalog = Self {
            entries: Vec::with_capacity(BUILTIN_MODELS.len()),
            index: HashMap::with_capacity(BUILTIN_MODELS.len()),
        };

        for (key, name, provider) in BUILTIN_MODELS {
            let previous = catalog
                .index
                .insert(key.to_string(), catalog.entries.len());
            debug_assert!(previous.is_none(), "duplicate builtin model key {}", key);
            catalog
                .entries
                .push((key.to_string(), ModelDescriptor::new(*name, *provider)));
        }

        catalog
    }

    /// Build a catalog from arbitrary entries, rejecting duplicate keys
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, ModelDescriptor)>,
        K: Into<String>,
    {
        let mut catalog = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (key, descriptor) in entries {
            let key = key.into();
            if catalog.index.contains_key(&key) {
                return Err(Error::ConfigError(format!("Duplicate model key: {}", key)));
            }
            catalog.index.insert(key.clone(), catalog.entries.len());
            catalog.entries.push((key, descriptor));
        }

        Ok(catalog)
    }

    /// Look up a descriptor; unknown keys are not an error
    pub fn get(&self, key: &str) -> Option<&ModelDescriptor> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Model keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// (key, descriptor) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelDescriptor)> {
        self.entries.iter().map(|(key, d)| (key.as_str(), d))
    }
}

impl Serialize for ModelCatalog {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, descriptor) in &self.entries {
            map.serialize_entry(key, descriptor)?;
        }
        map.end()
    }
}
