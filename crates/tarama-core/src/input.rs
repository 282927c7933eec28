//! Boundary state for caller-supplied strings
//!
//! Callers hand over values straight from form fields, which may be missing
//! or blank. Every public operation converts its arguments into [`Input`]
//! once and branches on it, instead of re-checking emptiness ad hoc.

/// A caller-supplied string, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// No value was supplied.
    Absent,
    /// A value was supplied but it is `""`.
    Empty,
    /// A non-empty value.
    Present(&'a str),
}

impl<'a> Input<'a> {
    /// The non-empty string, if any.
    #[inline]
    pub fn present(self) -> Option<&'a str> {
        match self {
            Input::Present(s) => Some(s),
            Input::Absent | Input::Empty => None,
        }
    }

    /// The raw string (`""` for `Absent`).
    #[inline]
    pub fn as_str(self) -> &'a str {
        match self {
            Input::Present(s) => s,
            Input::Absent | Input::Empty => "",
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Input::Present(_))
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        if s.is_empty() {
            Input::Empty
        } else {
            Input::Present(s)
        }
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::from(s.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Input<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(Input::Absent, Input::from)
    }
}

impl<'a> From<Option<&'a String>> for Input<'a> {
    fn from(s: Option<&'a String>) -> Self {
        s.map_or(Input::Absent, Input::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(Input::from("abc"), Input::Present("abc"));
        assert_eq!(Input::from(""), Input::Empty);
        assert_eq!(Input::from(None::<&str>), Input::Absent);
        assert_eq!(Input::from(Some("x")), Input::Present("x"));
        assert_eq!(Input::from(Some("")), Input::Empty);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Input::Absent.as_str(), "");
        assert_eq!(Input::Empty.present(), None);
        assert_eq!(Input::Present("x").present(), Some("x"));
        assert!(!Input::Empty.is_present());
    }
}
