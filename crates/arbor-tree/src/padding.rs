use crate::{Markers, Space};

/// An element followed by the space before the next delimiter.
#[derive(Clone, Debug, PartialEq)]
pub struct RightPadded<T> {
    pub element: T,
    pub after: Space,
    pub markers: Markers,
}

/// An element preceded by the space after a keyword or operator.
#[derive(Clone, Debug, PartialEq)]
pub struct LeftPadded<T> {
    pub before: Space,
    pub element: T,
    pub markers: Markers,
}

/// A delimited, ordered group such as an argument list.
#[derive(Clone, Debug, PartialEq)]
pub struct Container<T> {
    pub before: Space,
    pub elements: Vec<RightPadded<T>>,
    pub markers: Markers,
}

impl<T> RightPadded<T> {
    pub const fn build(element: T) -> Self {
        Self { element, after: Space::EMPTY, markers: Markers::EMPTY }
    }

    pub fn with_after(self, after: Space) -> Self {
        Self { after, ..self }
    }

    pub fn with_markers(self, markers: Markers) -> Self {
        Self { markers, ..self }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RightPadded<U> {
        RightPadded { element: f(self.element), after: self.after, markers: self.markers }
    }
}

impl<T> LeftPadded<T> {
    pub const fn build(element: T) -> Self {
        Self { before: Space::EMPTY, element, markers: Markers::EMPTY }
    }

    pub fn with_before(self, before: Space) -> Self {
        Self { before, ..self }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LeftPadded<U> {
        LeftPadded { before: self.before, element: f(self.element), markers: self.markers }
    }
}

impl<T> Container<T> {
    pub const fn build(elements: Vec<RightPadded<T>>) -> Self {
        Self { before: Space::EMPTY, elements, markers: Markers::EMPTY }
    }

    pub fn with_before(self, before: Space) -> Self {
        Self { before, ..self }
    }

    pub fn with_markers(self, markers: Markers) -> Self {
        Self { markers, ..self }
    }

    pub fn elements(&self) -> impl ExactSizeIterator<Item = &T> {
        self.elements.iter().map(|padded| &padded.element)
    }
}
