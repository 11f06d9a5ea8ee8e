//! Explicit application context for an interactive grade.
//!
//! A session owns the backend (and through it the uploaded image), the
//! current parameters, the tables built from them, the graded image, and the
//! curve plot. Every parameter change rebuilds all three tables, re-applies
//! them, and replots, in that order. A rejected change leaves the previous
//! state untouched.

use crate::backend::{BackendError, CurveBackend, CurveTexture};
use crate::error::GradeError;
use crate::grading::controls::ControlPanel;
use crate::grading::params::GradeParameters;
use crate::grading::transfer::TransferTables;
use crate::image::GradingImage;
use crate::plot::{CurveCanvas, CurvePlot};

/// Errors surfaced while starting or updating a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// A loaded image being graded through a [`CurveBackend`].
pub struct GradingSession<B: CurveBackend> {
    backend: B,
    params: GradeParameters,
    tables: TransferTables,
    graded: GradingImage,
    plot: CurvePlot,
}

impl<B: CurveBackend> GradingSession<B> {
    /// Upload `image` to `backend` and apply the neutral grade.
    ///
    /// Fails if the backend cannot take the image; no tables are built in
    /// that case.
    pub fn new(
        mut backend: B,
        image: &GradingImage,
        plot_width: u32,
        plot_height: u32,
    ) -> Result<Self, SessionError> {
        backend.upload(image)?;
        tracing::info!(
            "{} backend ready for {}x{} image ({})",
            backend.name(),
            image.width,
            image.height,
            image.source_bit_depth
        );

        let params = GradeParameters::default();
        let tables = TransferTables::from_parameters(&params)?;
        let graded = backend.apply_curves(&tables)?;
        let plot = CurvePlot::new(&tables, plot_width, plot_height);

        Ok(Self {
            backend,
            params,
            tables,
            graded,
            plot,
        })
    }

    /// Replace the grade: rebuild tables, re-apply them, and replot.
    pub fn update(&mut self, params: GradeParameters) -> Result<(), SessionError> {
        let tables = match TransferTables::from_parameters(&params) {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!("grade rejected: {e}");
                return Err(e.into());
            }
        };
        let graded = self.backend.apply_curves(&tables)?;
        self.plot = CurvePlot::new(&tables, self.plot.width, self.plot.height);
        self.graded = graded;
        self.tables = tables;
        self.params = params;
        Ok(())
    }

    /// Apply the grade described by the slider positions of `panel`.
    pub fn update_from_controls(&mut self, panel: &ControlPanel) -> Result<(), SessionError> {
        self.update(panel.to_parameters())
    }

    /// Change the curve display size and replot.
    pub fn resize_plot(&mut self, width: u32, height: u32) {
        self.plot = CurvePlot::new(&self.tables, width, height);
    }

    /// Current grade.
    pub fn params(&self) -> &GradeParameters {
        &self.params
    }

    /// Tables built from the current grade.
    pub fn tables(&self) -> &TransferTables {
        &self.tables
    }

    /// Source image filtered through the current tables.
    pub fn graded(&self) -> &GradingImage {
        &self.graded
    }

    /// Polylines for the current tables.
    pub fn plot(&self) -> &CurvePlot {
        &self.plot
    }

    /// Draw the current curves onto a fresh display surface.
    pub fn render_plot(&self) -> CurveCanvas {
        CurveCanvas::render(&self.plot)
    }

    /// Lookup strip for the current tables.
    pub fn texture(&self) -> CurveTexture {
        CurveTexture::from_tables(&self.tables)
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
