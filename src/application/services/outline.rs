//! Outline service
//!
//! Loads forest files into projectors and turns projected rows into
//! renderer-ready views.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::forest::parse_forest;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::{RenderConfig, Settings};
use crate::domain::{ForestBuilder, NodeSpec, Row, TreeArena, TreeProjector};
use crate::infrastructure::traits::FileSystem;

/// One row as a list renderer draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Leading whitespace proportional to the level
    pub indent: String,
    /// Expand/collapse indicator, empty for leaves
    pub marker: String,
    pub icon: String,
    pub title: String,
    pub subtitle: Option<String>,
}

impl RowView {
    pub fn from_row(row: &Row<'_>, render: &RenderConfig) -> Self {
        let marker = if !row.has_children {
            String::new()
        } else if row.node.is_expanded() {
            render.expanded_glyph.clone()
        } else {
            render.collapsed_glyph.clone()
        };
        Self {
            indent: " ".repeat(row.level * render.indent_width),
            marker,
            icon: row.node.data.icon.clone(),
            title: row.node.data.title.clone(),
            subtitle: row.node.data.subtitle.clone(),
        }
    }
}

/// Service for loading forests and presenting their projections.
pub struct OutlineService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl OutlineService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Pick the forest file: explicit argument first, then `default_forest`.
    pub fn resolve_forest_path(&self, explicit: Option<&Path>) -> ApplicationResult<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.settings.default_forest.clone())
            .ok_or_else(|| ApplicationError::Config {
                message: "no forest file given and no default_forest configured".into(),
            })
    }

    /// Read and parse a forest file into root specs.
    #[instrument(level = "debug", skip(self))]
    pub fn load_specs(&self, path: &Path) -> ApplicationResult<Vec<NodeSpec>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::ForestFormat {
                path: path.to_path_buf(),
                message: "not a file".into(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read forest", path)?;
        parse_forest(&content, path)
    }

    pub fn load_forest(&self, path: &Path) -> ApplicationResult<TreeArena> {
        let specs = self.load_specs(path)?;
        let forest = ForestBuilder::new()
            .initially_expanded(self.settings.default_expanded)
            .build(specs)?;
        debug!("load_forest: {} nodes from {}", forest.len(), path.display());
        Ok(forest)
    }

    /// Load a forest file and wrap it in a projector using the configured strategy.
    pub fn open(&self, path: &Path) -> ApplicationResult<TreeProjector> {
        let forest = self.load_forest(path)?;
        Ok(TreeProjector::with_strategy(forest, self.settings.reproject))
    }

    /// Apply row toggles in order, each against the rows left by the previous one.
    #[instrument(level = "debug", skip(self, projector))]
    pub fn apply_toggles(
        &self,
        projector: &mut TreeProjector,
        toggles: &[usize],
    ) -> ApplicationResult<()> {
        for &flat_index in toggles {
            let expanded = projector.toggle(flat_index)?;
            debug!("row {} expanded={}, {} rows", flat_index, expanded, projector.count());
        }
        Ok(())
    }

    pub fn row_views(&self, projector: &TreeProjector) -> Vec<RowView> {
        projector
            .rows()
            .map(|row| RowView::from_row(&row, &self.settings.render))
            .collect()
    }
}
