/// Whitespace and comments that precede a syntactic element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Space {
    pub whitespace: String,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comment {
    Text(TextComment),
    Python(PyComment),
}

/// A `//`, `/* */` or `#` comment in the shared core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextComment {
    pub text: String,
    pub multiline: bool,
    /// Whitespace between the end of the comment and the next comment or element.
    pub suffix: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PyComment {
    pub text: String,
    pub suffix: String,
    /// Set when the comment sits at the indentation of the following statement.
    pub aligned_to_indent: bool,
}

impl Space {
    pub const EMPTY: Self = Self { whitespace: String::new(), comments: Vec::new() };

    pub fn new(whitespace: impl Into<String>, comments: Vec<Comment>) -> Self {
        Self { whitespace: whitespace.into(), comments }
    }

    pub fn format(whitespace: impl Into<String>) -> Self {
        Self { whitespace: whitespace.into(), comments: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.whitespace.is_empty() && self.comments.is_empty()
    }

    pub fn with_comment(mut self, comment: impl Into<Comment>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

impl Comment {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(comment) => &comment.text,
            Self::Python(comment) => &comment.text,
        }
    }

    pub fn suffix(&self) -> &str {
        match self {
            Self::Text(comment) => &comment.suffix,
            Self::Python(comment) => &comment.suffix,
        }
    }

    pub const fn variant(&self) -> &'static str {
        match self {
            Self::Text(_) => "TextComment",
            Self::Python(_) => "PyComment",
        }
    }
}

impl From<TextComment> for Comment {
    fn from(comment: TextComment) -> Self {
        Self::Text(comment)
    }
}

impl From<PyComment> for Comment {
    fn from(comment: PyComment) -> Self {
        Self::Python(comment)
    }
}
