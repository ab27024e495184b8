use rust_embed::RustEmbed;

/// Word lists used by `word()`.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

lazy_static! {
  /// Embedded dictionary, one lowercase word per line.
  pub(super) static ref WORDS: Vec<String> = Assets::get("words.txt").map_or(vec![], |f| {
    String::from_utf8_lossy(&f.data)
      .lines()
      .map(str::trim)
      .filter(|w| !w.is_empty() && !w.starts_with('#'))
      .map(str::to_string)
      .collect()
  });
}
