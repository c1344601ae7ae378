//! Structured views of a header value.
//!
//! A value such as `text/html; charset="utf-8"; q=0.9` is tokenized into one
//! [`HeaderElement`] (`text/html`) carrying its parameters as [`NameValuePair`]s.

use std::fmt;

/// A name with an optional value, as found in header parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameValuePair {
    name: String,
    value: Option<String>,
}

impl NameValuePair {
    pub fn new<N: Into<String>>(name: N, value: Option<String>) -> Self {
        Self { name: name.into(), value }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value with any surrounding quotes already removed.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for NameValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pair(f, &self.name, self.value.as_deref())
    }
}

/// One element of a header value: a name, an optional value and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderElement {
    name: String,
    value: Option<String>,
    parameters: Vec<NameValuePair>,
}

impl HeaderElement {
    pub fn new<N: Into<String>>(name: N, value: Option<String>, parameters: Vec<NameValuePair>) -> Self {
        Self { name: name.into(), value, parameters }
    }

    /// Returns the element name. It may be empty when the value starts with a `;`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the parameters in the order they appeared.
    #[inline]
    pub fn parameters(&self) -> &[NameValuePair] {
        &self.parameters
    }

    /// Finds the first parameter whose name matches `name`, ignoring ASCII case.
    pub fn parameter(&self, name: &str) -> Option<&NameValuePair> {
        self.parameters.iter().find(|param| param.name.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HeaderElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pair(f, &self.name, self.value.as_deref())?;
        for param in &self.parameters {
            f.write_str("; ")?;
            write_pair(f, &param.name, param.value.as_deref())?;
        }
        Ok(())
    }
}

fn write_pair(f: &mut fmt::Formatter<'_>, name: &str, value: Option<&str>) -> fmt::Result {
    f.write_str(name)?;
    match value {
        Some(value) if needs_quoting(value) => write!(f, "=\"{value}\""),
        Some(value) => write!(f, "={value}"),
        None => Ok(()),
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty() || value.chars().any(|ch| ch.is_whitespace() || matches!(ch, ';' | ',' | '=' | '"'))
}
