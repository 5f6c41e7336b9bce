use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::{Game, Row};

pub const CSV_HEADER: [&str; 14] = [
    "name",
    "gameId",
    "playerId",
    "gender",
    "teamId",
    "leagueId",
    "goals",
    "assists",
    "second_assists",
    "blocks",
    "throwaways",
    "drops",
    "other_passes",
    "pickup",
];

/// Output files written as a unit: every file is staged to a sibling temp
/// file first and only `commit` moves them into place. Dropping an
/// uncommitted batch removes whatever was staged.
#[derive(Debug, Default)]
pub struct OutputBatch {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl OutputBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_json(&mut self, path: &Path, rows: &[Row]) -> Result<()> {
        self.json(path, rows)
    }

    pub fn rows_csv(&mut self, path: &Path, rows: &[Row]) -> Result<()> {
        let bytes = rows_to_csv(rows)?;
        self.stage(path, &bytes)
    }

    pub fn games_json(&mut self, path: &Path, games: &[Game]) -> Result<()> {
        self.json(path, games)
    }

    pub fn commit(mut self) -> Result<Vec<PathBuf>> {
        let staged = std::mem::take(&mut self.staged);
        let mut committed: Vec<PathBuf> = Vec::with_capacity(staged.len());
        let mut pending = staged.into_iter();
        while let Some((tmp, path)) = pending.next() {
            if let Err(err) = fs::rename(&tmp, &path) {
                let _ = fs::remove_file(&tmp);
                for (tmp, _) in pending {
                    let _ = fs::remove_file(&tmp);
                }
                for done in &committed {
                    let _ = fs::remove_file(done);
                }
                return Err(err).with_context(|| format!("move {}", path.display()));
            }
            log::info!("wrote {}", path.display());
            committed.push(path);
        }
        Ok(committed)
    }

    fn json<T: Serialize + ?Sized>(&mut self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_vec(value)
            .with_context(|| format!("serialize {}", path.display()))?;
        self.stage(path, &json)
    }

    fn stage(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create output dir {}", dir.display()))?;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let tmp = path.with_extension(format!("{ext}.tmp"));
        fs::write(&tmp, bytes)
            .with_context(|| format!("write {}", tmp.display()))?;
        self.staged.push((tmp, path.to_path_buf()));
        Ok(())
    }
}

impl Drop for OutputBatch {
    fn drop(&mut self) {
        for (tmp, _) in self.staged.drain(..) {
            let _ = fs::remove_file(&tmp);
        }
    }
}

/// Header line first even when there are no rows. Missing gender is an
/// empty cell.
pub fn rows_to_csv(rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER).context("write csv header")?;
    for row in rows {
        writer.serialize(row).context("write csv row")?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flush csv: {}", err.error()))
}
