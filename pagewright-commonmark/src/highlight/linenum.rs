//! Line numbering requested through a code block's `data-linenum` attribute.

/// Where numbering starts and whether the number gutter is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumbering {
  pub start:  i64,
  pub gutter: bool,
}

impl Default for LineNumbering {
  fn default() -> Self {
    Self {
      start:  1,
      gutter: false,
    }
  }
}

impl LineNumbering {
  /// Resolve numbering from the raw attribute value.
  ///
  /// `"true"` starts at 1, a leading integer starts at that integer unless it
  /// is zero, anything else starts at 1. The gutter is shown whenever the
  /// attribute is present, whatever its value.
  #[must_use]
  pub fn from_attribute(value: Option<&str>) -> Self {
    let Some(value) = value else {
      return Self::default();
    };

    let start = if value == "true" {
      1
    } else {
      parse_leading_int(value).filter(|n| *n != 0).unwrap_or(1)
    };

    Self {
      start,
      gutter: true,
    }
  }
}

/// Parse an optionally signed run of decimal digits at the start of `value`,
/// ignoring leading whitespace and anything after the digits.
fn parse_leading_int(value: &str) -> Option<i64> {
  let trimmed = value.trim_start();
  let (negative, digits) = match trimmed.as_bytes().first() {
    Some(b'-') => (true, &trimmed[1..]),
    Some(b'+') => (false, &trimmed[1..]),
    _ => (false, trimmed),
  };

  let end = digits
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(digits.len());
  let magnitude: i64 = digits[..end].parse().ok()?;

  Some(if negative { -magnitude } else { magnitude })
}
