//! Writing rendered artifacts to disk.
//!
//! Each file is staged in a temporary file in the target directory and then
//! renamed into place, so a failed write never leaves a partial artifact.
//! The two renames are separate: if the edit list cannot be moved into place
//! after the subtitles were, the new `output.srt` stays next to whatever
//! `output.edl` was there before, and the error is returned.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::pipeline::RenderedOutputs;
use crate::render::{EditListRenderer, SubtitleRenderer, TimelineRenderer};

const UTF8_BOM: &str = "\u{feff}";

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub subtitle_path: PathBuf,
    pub edit_list_path: PathBuf,
}

fn stage(dir: &Path, contents: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    Ok(file)
}

/// Write `output.srt` and `output.edl` into `dir`, creating it if needed.
///
/// Both files are fully staged before either is moved into place. The
/// subtitle file starts with a UTF-8 byte-order mark when
/// `config.subtitle_bom` is set.
pub fn write_outputs(
    dir: &Path,
    outputs: &RenderedOutputs,
    config: &EngineConfig,
) -> EngineResult<WrittenOutputs> {
    fs::create_dir_all(dir)?;

    let subtitles = if config.subtitle_bom {
        format!("{}{}", UTF8_BOM, outputs.subtitles)
    } else {
        outputs.subtitles.clone()
    };

    let staged_subtitles = stage(dir, subtitles.as_bytes())?;
    let staged_edit_list = stage(dir, outputs.edit_list.as_bytes())?;

    let subtitle_path = dir.join(SubtitleRenderer::new().file_name());
    let edit_list_path = dir.join(EditListRenderer::new(config.frame_rate).file_name());

    staged_subtitles
        .persist(&subtitle_path)
        .map_err(|e| e.error)?;
    staged_edit_list
        .persist(&edit_list_path)
        .map_err(|e| e.error)?;

    info!(
        subtitle = %subtitle_path.display(),
        edit_list = %edit_list_path.display(),
        "Wrote outputs"
    );

    Ok(WrittenOutputs {
        subtitle_path,
        edit_list_path,
    })
}
