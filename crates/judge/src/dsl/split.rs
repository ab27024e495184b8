/// Split a DSL source into call expressions.
///
/// Only `.` outside of parentheses separates two calls, so ranges like `1..100`
/// inside an argument list are kept intact. Segments are trimmed and empty
/// trailing segments are dropped.
pub fn split(source: &str) -> Vec<String> {
  let mut segments = Vec::new();
  let mut current = String::new();
  let mut depth = 0i32;

  for c in source.chars() {
    match c {
      '(' => depth += 1,
      ')' => depth -= 1,
      '.' if depth == 0 => {
        segments.push(current.trim().to_string());
        current.clear();
        continue;
      }
      _ => {}
    }
    current.push(c);
  }
  segments.push(current.trim().to_string());

  while segments.last().map_or(false, |s| s.is_empty()) {
    segments.pop();
  }

  return segments;
}
