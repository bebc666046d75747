// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON job files: a card list plus layout settings.
//
// ```json
// {
//   "cards": [{ "image": "bolt.png", "copies": 4 }, { "image": "island.png" }],
//   "config": { "layout": "3x3", "paper": "a3", "background": "black" }
// }
// ```

use std::path::Path;

use cardsheet_core::error::Result;
use cardsheet_core::{CardSession, ImageRef, LayoutConfig};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobFile {
    pub cards: Vec<JobCard>,
    pub config: LayoutConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobCard {
    pub image: ImageRef,
    /// Clamped to `1..=MAX_COPIES` when added to the session.
    #[serde(default = "one")]
    pub copies: i64,
}

fn one() -> i64 {
    1
}

impl JobFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let job: JobFile = serde_json::from_str(&text)?;
        info!(path = %path.display(), cards = job.cards.len(), "Job file loaded");
        Ok(job)
    }
}

/// Build a session from `config` and cards given as `(image, copies)` pairs.
pub fn build_session(
    config: LayoutConfig,
    cards: impl IntoIterator<Item = (ImageRef, i64)>,
) -> Result<CardSession> {
    let mut session = CardSession::new(config);
    for (image, copies) in cards {
        let id = session.add(image);
        let stored = session.set_copies(id, copies)?;
        debug!(card = %id, copies = stored, "Card queued");
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsheet_core::{CardsheetError, MAX_COPIES, PaperKind};

    #[test]
    fn job_file_parses_with_defaults() {
        let job: JobFile = serde_json::from_str(
            r#"{ "cards": [{ "image": "a.png", "copies": 3 }, { "image": "b.png" }],
                 "config": { "paper": "a3" } }"#,
        )
        .unwrap();
        assert_eq!(job.cards.len(), 2);
        assert_eq!(job.cards[1].copies, 1);
        assert_eq!(job.config.paper, PaperKind::A3);
        assert_eq!(job.config.dpi, 300);
    }

    #[test]
    fn empty_object_is_an_empty_job() {
        let job: JobFile = serde_json::from_str("{}").unwrap();
        assert!(job.cards.is_empty());
        assert_eq!(job.config, LayoutConfig::default());
    }

    #[test]
    fn bad_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JobFile::load(&path),
            Err(CardsheetError::Serialization(_))
        ));
    }

    #[test]
    fn session_clamps_job_copies() {
        let session = build_session(
            LayoutConfig::default(),
            [
                ("a.png".into(), 0),
                ("b.png".into(), 2),
                ("c.png".into(), 4_000_000_000),
            ],
        )
        .unwrap();
        let copies: Vec<u32> = session.cards().iter().map(|c| c.copies).collect();
        assert_eq!(copies, [1, 2, MAX_COPIES]);
    }
}
