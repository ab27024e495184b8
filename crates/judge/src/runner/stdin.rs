use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Standard input of one execution, consumed one line per read.
///
/// The cursor is owned by the execution it feeds and yields `None` (EOF) once
/// every line has been read.
#[derive(Debug, Clone)]
pub struct StdinCursor {
  lines: Vec<String>,
  position: usize,
  trailing_newline: bool,
}

impl StdinCursor {
  pub fn new(stdin: &str) -> Self {
    Self {
      lines: stdin.lines().map(str::to_string).collect(),
      position: 0,
      trailing_newline: stdin.ends_with('\n'),
    }
  }

  /// Lines not read yet.
  pub fn remaining(&self) -> usize {
    self.lines.len() - self.position
  }

  /// Write every remaining line to `writer`.
  ///
  /// Lines are separated by `\n`; the last one only gets a newline if the
  /// original input ended with one.
  pub async fn feed<W: AsyncWrite + Unpin>(mut self, writer: &mut W) -> io::Result<()> {
    let mut first = true;
    while let Some(line) = self.next() {
      if !first {
        writer.write_all(b"\n").await?;
      }
      writer.write_all(line.as_bytes()).await?;
      first = false;
    }
    if self.trailing_newline && !first {
      writer.write_all(b"\n").await?;
    }
    writer.flush().await
  }
}

impl Iterator for StdinCursor {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    let line = self.lines.get(self.position)?.clone();
    self.position += 1;
    Some(line)
  }
}
