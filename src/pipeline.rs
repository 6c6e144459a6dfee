use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use crate::{
    compose::compose,
    error::{FavgenError, FavgenResult},
    fragment::extract_fragment,
    model::{Canvas, CompositionSpec, SvgDocument},
    raster::rasterize,
    writer::write_png,
};

pub const PREVIEW_SIZE: (u32, u32) = (1200, 630);

const ICON_TEMPLATE: &str = "favicon.svg";
const LOGO_TEMPLATE: &str = "logo.svg";
const PREVIEW_OUTPUT: &str = "og.png";

const ICON_OUTPUTS: [(u32, &str); 3] = [
    (16, "favicon-16x16.png"),
    (32, "favicon-32x32.png"),
    (180, "apple-touch-icon.png"),
];

/// Where the batch reads its templates and writes its rasters, plus the text
/// that goes on the preview card. Passed in explicitly so the whole pipeline
/// runs against temporary directories in tests.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BatchConfig {
    pub assets_dir: PathBuf,
    pub out_dir: PathBuf,
    pub title: String,
    pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchState {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One rasterization unit: a document, a target pixel size, and the filename
/// it lands under. Built once per run and consumed once, in declared order.
#[derive(Clone, Debug)]
pub struct RasterTask {
    pub doc: SvgDocument,
    pub width: u32,
    pub height: u32,
    pub file_name: String,
}

#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
}

/// Drives the fixed output set: three favicon rasters from the icon template
/// plus the composed social preview. Fail-fast: the first fatal error ends
/// the run, and a batch is never reused across runs.
pub struct Batch {
    config: BatchConfig,
    state: BatchState,
}

impl Batch {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            state: BatchState::Pending,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn run(&mut self) -> FavgenResult<BatchSummary> {
        if self.state != BatchState::Pending {
            return Err(FavgenError::validation(
                "batch has already run; create a new one per run",
            ));
        }
        self.state = BatchState::Running;
        match self.execute() {
            Ok(summary) => {
                self.state = BatchState::Completed;
                Ok(summary)
            }
            Err(e) => {
                self.state = BatchState::Failed;
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    fn execute(&self) -> FavgenResult<BatchSummary> {
        // Both templates load before anything is written, so a missing source
        // cannot leave a partial output set behind.
        let icon = SvgDocument::load(&self.config.assets_dir.join(ICON_TEMPLATE))?;
        let logo = SvgDocument::load(&self.config.assets_dir.join(LOGO_TEMPLATE))?;

        let fragment = extract_fragment(&logo);
        if fragment.is_none() {
            tracing::warn!(
                "no group node found in '{LOGO_TEMPLATE}'; preview will omit the artwork"
            );
        }

        let spec = CompositionSpec::preview_card(
            Canvas {
                width: PREVIEW_SIZE.0,
                height: PREVIEW_SIZE.1,
            },
            &self.config.title,
            &self.config.url,
        );
        let preview = compose(&spec, fragment.as_ref())?;

        let mut tasks = Vec::with_capacity(ICON_OUTPUTS.len() + 1);
        for (size, name) in ICON_OUTPUTS {
            tasks.push(RasterTask {
                doc: icon.clone(),
                width: size,
                height: size,
                file_name: name.to_string(),
            });
        }
        tasks.push(RasterTask {
            doc: preview,
            width: PREVIEW_SIZE.0,
            height: PREVIEW_SIZE.1,
            file_name: PREVIEW_OUTPUT.to_string(),
        });
        ensure_unique_outputs(&tasks)?;

        let mut written = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let image = rasterize(&task.doc, task.width, task.height)?;
            let path = self.config.out_dir.join(&task.file_name);
            write_png(&image, &path)?;
            tracing::info!(
                "wrote {} ({}x{})",
                task.file_name,
                task.width,
                task.height
            );
            written.push(path);
        }

        tracing::info!("all {} assets generated", written.len());
        Ok(BatchSummary { written })
    }
}

/// No two tasks may target the same file within a run.
fn ensure_unique_outputs(tasks: &[RasterTask]) -> FavgenResult<()> {
    let mut seen = BTreeSet::new();
    for task in tasks {
        if !seen.insert(task.file_name.as_str()) {
            return Err(FavgenError::validation(format!(
                "duplicate output filename '{}'",
                task.file_name
            )));
        }
    }
    Ok(())
}

/// Default directory layout of the documentation site: templates and rasters
/// both live under `public/`.
pub fn default_config(site_root: &Path, title: &str, url: &str) -> BatchConfig {
    let public = site_root.join("public");
    BatchConfig {
        assets_dir: public.clone(),
        out_dir: public,
        title: title.to_string(),
        url: url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> BatchConfig {
        BatchConfig {
            assets_dir: dir.to_path_buf(),
            out_dir: dir.join("out"),
            title: "Example".to_string(),
            url: "example.com".to_string(),
        }
    }

    #[test]
    fn missing_template_fails_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = Batch::new(config_in(dir.path()));
        assert_eq!(batch.state(), BatchState::Pending);

        let err = batch.run().unwrap_err();
        assert!(matches!(err, FavgenError::SourceNotFound(_)));
        assert_eq!(batch.state(), BatchState::Failed);
    }

    #[test]
    fn a_batch_runs_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = Batch::new(config_in(dir.path()));
        let _ = batch.run();
        let err = batch.run().unwrap_err();
        assert!(matches!(err, FavgenError::Validation(_)));
    }

    #[test]
    fn duplicate_output_names_are_rejected() {
        let doc = SvgDocument::from_markup("<svg/>");
        let task = |name: &str| RasterTask {
            doc: doc.clone(),
            width: 1,
            height: 1,
            file_name: name.to_string(),
        };
        assert!(ensure_unique_outputs(&[task("a.png"), task("b.png")]).is_ok());
        assert!(ensure_unique_outputs(&[task("a.png"), task("a.png")]).is_err());
    }

    #[test]
    fn default_config_points_at_public_dir() {
        let cfg = default_config(Path::new("/site"), "T", "t.example");
        assert_eq!(cfg.assets_dir, Path::new("/site/public"));
        assert_eq!(cfg.out_dir, Path::new("/site/public"));
    }
}
