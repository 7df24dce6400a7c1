//! Indentation normalisation for code block sources.

/// Strip the indentation every non-blank line of `source` shares.
///
/// Only leading tabs count as indentation. A blank first or last line is
/// dropped, and blank interior lines become a single space so the rendered
/// block keeps its height.
#[must_use]
pub fn outdent(source: &str) -> String {
  let lines: Vec<&str> = source.split('\n').collect();
  let last = lines.len().saturating_sub(1);

  let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
  let mut min_tabs: Option<usize> = None;

  for (i, line) in lines.iter().enumerate() {
    let blank = line.trim().is_empty();
    if blank && (i == 0 || i == last) {
      continue;
    }
    if blank {
      kept.push(" ");
      continue;
    }

    let tabs = leading_tabs(line);
    min_tabs = Some(min_tabs.map_or(tabs, |min| min.min(tabs)));
    kept.push(line);
  }

  let strip = min_tabs.unwrap_or(0);
  kept
    .iter()
    .map(|line| {
      if line.trim().is_empty() {
        *line
      } else {
        &line[strip..]
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn leading_tabs(line: &str) -> usize {
  line.bytes().take_while(|b| *b == b'\t').count()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_common_tabs_removed() {
    let source = "\n\t\tfoo();\n\t\t\tbar();\n\t\tbaz();\n";
    assert_eq!(outdent(source), "foo();\n\tbar();\nbaz();");
  }

  #[test]
  fn test_blank_interior_line_becomes_space() {
    assert_eq!(outdent("\ta\n\n\tb"), "a\n \nb");
    assert_eq!(outdent("\ta\n\t  \n\tb"), "a\n \nb");
  }

  #[test]
  fn test_unindented_text_is_unchanged() {
    let source = "one\n\ttwo\nthree";
    assert_eq!(outdent(source), source);
    assert_eq!(outdent(&outdent(source)), source);
  }

  #[test]
  fn test_k_tab_round_trip() {
    let body = "if (x) {\n\treturn y;\n}";
    for k in 0..4 {
      let prefix = "\t".repeat(k);
      let indented = body
        .lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n");
      assert_eq!(outdent(&indented), body, "k = {k}");
    }
  }

  #[test]
  fn test_spaces_are_not_indentation() {
    assert_eq!(outdent("  a\n\tb"), "  a\n\tb");
  }

  #[test]
  fn test_only_whitespace() {
    assert_eq!(outdent(""), "");
    assert_eq!(outdent("\n"), "");
    assert_eq!(outdent("\t\n\n\t"), " ");
  }
}
