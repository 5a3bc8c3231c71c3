use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified class name, e.g. `com.example.Root`.
///
/// Two refs with the same name are the same class.
#[derive(
    Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(transparent)]
pub struct ClassRef(String);

impl ClassRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ClassRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_is_transparent() {
        let class = ClassRef::from("com.example.A");
        let json = serde_json::to_string(&class).unwrap();
        assert_eq!(json, "\"com.example.A\"");
        let back: ClassRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, class);
    }
}
