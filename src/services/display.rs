use std::io::{self, Write};

use crate::dto::scene::Scene;

/// Prints the text rendering of each scene, skipping frames where nothing
/// visible changed.
pub struct TerminalDisplay<W> {
    out: W,
    last: Option<String>,
}

impl TerminalDisplay<io::Stdout> {
    /// Display writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Display writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    /// Write `scene` if its text differs from the previous one. Returns
    /// whether anything was written.
    pub fn present(&mut self, scene: &Scene) -> io::Result<bool> {
        let text = scene.to_string();
        if self.last.as_deref() == Some(text.as_str()) {
            return Ok(false);
        }
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        self.last = Some(text);
        Ok(true)
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_scene_is_printed_once() {
        let mut display = TerminalDisplay::new(Vec::new());
        let scene = Scene::GetReady {
            player: 1,
            countdown: 3,
        };
        assert!(display.present(&scene).unwrap());
        assert!(!display.present(&scene).unwrap());

        let next = Scene::GetReady {
            player: 1,
            countdown: 2,
        };
        assert!(display.present(&next).unwrap());

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
    }
}
