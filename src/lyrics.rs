//! Song lyric editing with section tags.
//!
//! Lyrics are plain text where a line such as `[Chorus]` opens a section.
//! [`LyricEditor`] wraps its own [`EditSession`] so lyric history is kept
//! apart from the main editor.

use crate::activity::EntryKind;
use crate::collab::FileExporter;
use crate::error::Result;
use crate::session::EditSession;

/// Section tags offered for insertion.
pub const SECTION_TAGS: [&str; 10] = [
    "[Intro]",
    "[Verse]",
    "[Chorus]",
    "[Bridge]",
    "[Outro]",
    "[Pre-Chorus]",
    "[Refrain]",
    "[Solo]",
    "[Break]",
    "[Fade Out]",
];

/// File name used by [`LyricEditor::export`].
pub const EXPORT_FILENAME: &str = "suno-song.txt";

/// Append `tag` on its own line, leaving a blank line after existing text.
#[must_use]
pub fn insert_tag(text: &str, tag: &str) -> String {
    let separator = if text.is_empty() || text.ends_with('\n') {
        ""
    } else {
        "\n\n"
    };
    format!("{text}{separator}{tag}\n")
}

/// Distinct section tags in order of first appearance.
#[must_use]
pub fn song_structure(text: &str) -> Vec<String> {
    let mut sections: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('[') && line.ends_with(']') && !sections.iter().any(|s| s == line) {
            sections.push(line.to_string());
        }
    }
    sections
}

/// Lyric buffer with tag insertion and export.
#[derive(Debug)]
pub struct LyricEditor {
    session: EditSession,
}

impl Default for LyricEditor {
    fn default() -> Self {
        Self::new(EditSession::new(EntryKind::GeneratedLyric))
    }
}

impl LyricEditor {
    /// Wrap an existing session, typically one built with a commit hook.
    #[must_use]
    pub fn new(session: EditSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.session.text()
    }

    /// Append a section tag.
    pub fn insert_tag(&mut self, tag: &str) -> bool {
        let next = insert_tag(self.session.text(), tag);
        self.session.set_text(next)
    }

    #[must_use]
    pub fn structure(&self) -> Vec<String> {
        song_structure(self.session.text())
    }

    /// Export the lyrics to [`EXPORT_FILENAME`]. Returns `false` for an empty
    /// buffer, which is not exported.
    pub fn export(&self, exporter: &mut dyn FileExporter) -> Result<bool> {
        if self.session.text().is_empty() {
            return Ok(false);
        }
        self.session.export(exporter, EXPORT_FILENAME)?;
        Ok(true)
    }
}
