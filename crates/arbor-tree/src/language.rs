use std::fmt;

use serde::{Deserialize, Serialize};

/// Source language a tree was parsed from.
///
/// The Java node set doubles as the core every other language extends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::Java, Self::Python];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
