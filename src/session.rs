//! Application state driven by the input surface.
//!
//! A [`Session`] owns the loaded source, the current parameters and view, and
//! the most recent output. Every successful load and every parameter change
//! recomputes the output in full; failures leave the state as it was.

use crate::color::AdjustmentParameters;
use crate::error::GradientError;
use crate::gradient::compose;
use crate::io::{load_image, save_png};
use crate::view::{ViewState, VisibleRegion};
use image::RgbaImage;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Session {
    source: Option<RgbaImage>,
    output: Option<RgbaImage>,
    params: AdjustmentParameters,
    view: ViewState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<(), GradientError> {
        let source = load_image(path)?;
        self.set_source(source);
        Ok(())
    }

    /// Replace the source image, reset the view and recompute.
    pub fn set_source(&mut self, source: RgbaImage) {
        self.source = Some(source);
        self.view.reset();
        self.recompute();
    }

    pub fn set_parameters(&mut self, params: AdjustmentParameters) {
        self.params = params.clamped();
        self.recompute();
    }

    pub fn save(&self, path: &Path) -> Result<(), GradientError> {
        let output = self.output.as_ref().ok_or(GradientError::NoResult)?;
        save_png(output, path)
    }

    pub fn pan_by(&mut self, dx: i64, dy: i64) {
        self.view.pan_by(dx, dy);
    }

    pub fn zoom_by_scroll(&mut self, delta: f64) -> bool {
        self.view.zoom_by_scroll(delta)
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    pub fn output(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    pub fn parameters(&self) -> AdjustmentParameters {
        self.params
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// The part of the zoomed output visible in a `viewport`-sized canvas.
    pub fn display_region(&self, viewport: (u32, u32), max_side: u32) -> Option<VisibleRegion> {
        self.output
            .as_ref()
            .and_then(|output| self.view.render_visible(output, viewport, max_side))
    }

    fn recompute(&mut self) {
        if let Some(source) = &self.source {
            self.output = compose(source, &self.params);
        }
    }
}
