use std::{fmt, str::FromStr};

use crate::foundation::error::{MergeVizError, MergeVizResult};

/// A single sortable value with the label shown inside its box.
///
/// Every value is an `f64`; the label remembers how the value was written so that
/// `3` stays `3` and `23.5` stays `23.5` in narration and on screen.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    value: f64,
    label: String,
}

impl Element {
    pub fn int(value: i64) -> Self {
        Self {
            value: value as f64,
            label: value.to_string(),
        }
    }

    pub fn real(value: f64) -> Self {
        Self {
            value,
            label: real_label(value),
        }
    }

    /// Parse a single token: integer literals stay integers, anything else numeric is real.
    pub fn parse(token: &str) -> MergeVizResult<Self> {
        let token = token.trim();
        if let Ok(v) = token.parse::<i64>() {
            return Ok(Self::int(v));
        }
        token
            .parse::<f64>()
            .map(Self::real)
            .map_err(|_| MergeVizError::validation(format!("'{token}' is not a number")))
    }

    /// Convert a JSON value. Non-numeric values cannot be ordered against numbers.
    pub fn from_json(value: &serde_json::Value) -> MergeVizResult<Self> {
        if let Some(v) = value.as_i64() {
            return Ok(Self::int(v));
        }
        if let Some(v) = value.as_f64() {
            return Ok(Self::real(v));
        }
        Err(MergeVizError::comparison(format!(
            "cannot order {value} against numbers"
        )))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_orderable(&self) -> bool {
        !self.value.is_nan()
    }
}

fn real_label(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<i64> for Element {
    fn from(v: i64) -> Self {
        Self::int(v)
    }
}

impl From<f64> for Element {
    fn from(v: f64) -> Self {
        Self::real(v)
    }
}

/// An ordered list of elements. Displays like `[3, 7, 23.5]`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Element>);

impl Sequence {
    pub fn new(elements: Vec<Element>) -> Self {
        Self(elements)
    }

    pub fn from_ints(values: &[i64]) -> Self {
        values.iter().copied().map(Element::int).collect()
    }

    /// Parse `"3, 7, -10 23.5"` or `"[3, 7]"`; commas and whitespace both separate.
    pub fn parse(text: &str) -> MergeVizResult<Self> {
        let body = text.trim();
        let body = body
            .strip_prefix('[')
            .and_then(|b| b.strip_suffix(']'))
            .unwrap_or(body);
        body.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(Element::parse)
            .collect()
    }

    /// Parse a JSON array of numbers.
    pub fn from_json_str(json: &str) -> MergeVizResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Array(items) = value else {
            return Err(MergeVizError::validation(
                "input JSON must be an array of numbers",
            ));
        };
        items.iter().map(Element::from_json).collect()
    }

    /// Every element must be orderable against every other one.
    pub fn validate_orderable(&self) -> MergeVizResult<()> {
        if let Some((idx, e)) = self.0.iter().enumerate().find(|(_, e)| !e.is_orderable()) {
            return Err(MergeVizError::comparison(format!(
                "element {idx} ('{}') cannot be ordered",
                e.label
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.0.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(Element::value).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(Element::label).collect()
    }

    pub fn split_at(&self, mid: usize) -> (Sequence, Sequence) {
        let (l, r) = self.0.split_at(mid);
        (Self(l.to_vec()), Self(r.to_vec()))
    }

    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|w| w[0].value <= w[1].value)
    }

    pub(crate) fn push(&mut self, e: Element) {
        self.0.push(e);
    }

    pub(crate) fn extend_from_slice(&mut self, rest: &[Element]) {
        self.0.extend_from_slice(rest);
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&e.label)?;
        }
        f.write_str("]")
    }
}

impl FromStr for Sequence {
    type Err = MergeVizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<Element> for Sequence {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Element>> for Sequence {
    fn from(v: Vec<Element>) -> Self {
        Self(v)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sort/element.rs"]
mod tests;
