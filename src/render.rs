//! Three-panel heatmap rendering
//!
//! A [`Figure`] holds already-computed bit grids and their titles; it knows
//! nothing about fingerprint extraction. Drawing goes through `plotters`,
//! either to a file (format taken from the extension) or to a temporary PNG
//! handed to the platform image viewer.

use log::{debug, error, info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use crate::bits::BitMatrix;
use crate::config::FigureConfig;
use crate::error::{RenderError, RenderResult};
use crate::types::FINGERPRINT_BITS;

/// Y axis label shared by all panels
pub const BIT_AXIS_LABEL: &str = "Bit Position (0 = LSB, 31 = MSB)";

/// X axis label of the bottom panel
pub const FRAME_AXIS_LABEL: &str = "Fingerprint Frame";

pub const FINGERPRINT_1_TITLE: &str = "Chromaprint Fingerprint 1 (white=0, black=1)";
pub const FINGERPRINT_2_TITLE: &str = "Chromaprint Fingerprint 2 (white=0, black=1)";

const FONT_FAMILY: &str = "sans-serif";
const TITLE_FONT_SIZE: f64 = 18.0;
const LABEL_FONT_SIZE: f64 = 13.0;

/// Fonts tried in order when none is configured
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_LOADED: OnceLock<bool> = OnceLock::new();

/// Title of the difference panel, carrying the differing-bit total
pub fn diff_title(differing_bits: usize) -> String {
    format!(
        "Bitwise Chromaprint Fingerprint Difference (white=same, black=different), Total: {} bits differ",
        differing_bits
    )
}

/// One titled bit grid
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub bits: BitMatrix,
}

/// Fingerprint 1, fingerprint 2 and their difference, top to bottom
#[derive(Debug, Clone)]
pub struct Figure {
    pub panels: [Panel; 3],
}

impl Figure {
    pub fn new(first: BitMatrix, second: BitMatrix, diff: BitMatrix) -> Self {
        let diff_bits = diff.count_ones();
        Self {
            panels: [
                Panel {
                    title: FINGERPRINT_1_TITLE.to_string(),
                    bits: first,
                },
                Panel {
                    title: FINGERPRINT_2_TITLE.to_string(),
                    bits: second,
                },
                Panel {
                    title: diff_title(diff_bits),
                    bits: diff,
                },
            ],
        }
    }

    /// Width of the shared frame axis
    pub fn frames(&self) -> usize {
        self.panels.iter().map(|p| p.bits.width()).max().unwrap_or(0)
    }

    /// Set cells in the difference panel
    pub fn differing_bits(&self) -> usize {
        self.panels[2].bits.count_ones()
    }

    /// Draw the figure into `path`; `.svg` selects the SVG backend, any other
    /// extension goes through the bitmap encoder.
    ///
    /// The font is registered on the first save in the process (see
    /// [`ensure_font`]); `config.font_path` on later calls has no effect.
    pub fn save(&self, path: &Path, config: &FigureConfig) -> RenderResult<()> {
        let text = ensure_font(config.font_path.as_deref());
        let size = (config.width, config.height);
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

        if is_svg {
            draw(SVGBackend::new(path, size).into_drawing_area(), self, text)?;
        } else {
            draw(BitMapBackend::new(path, size).into_drawing_area(), self, text)?;
        }
        info!("Saved figure to {}", path.display());
        Ok(())
    }
}

/// Destination of a rendered figure
pub trait FigureSink {
    fn present(&self, figure: &Figure) -> RenderResult<()>;
}

impl<F> FigureSink for F
where
    F: Fn(&Figure) -> RenderResult<()>,
{
    fn present(&self, figure: &Figure) -> RenderResult<()> {
        self(figure)
    }
}

/// Writes the figure to a file
#[derive(Debug, Clone)]
pub struct SaveToFile {
    pub path: PathBuf,
    pub config: FigureConfig,
}

impl FigureSink for SaveToFile {
    fn present(&self, figure: &Figure) -> RenderResult<()> {
        figure.save(&self.path, &self.config)
    }
}

/// Writes the figure to a temporary PNG and opens it in the system viewer.
///
/// The viewer reads the file after this process may have exited, so each
/// `fpdiff-*.png` is left in the temp directory.
#[derive(Debug, Clone, Default)]
pub struct ShowInViewer {
    pub config: FigureConfig,
}

impl FigureSink for ShowInViewer {
    fn present(&self, figure: &Figure) -> RenderResult<()> {
        let path = tempfile::Builder::new()
            .prefix("fpdiff-")
            .suffix(".png")
            .tempfile()?
            .into_temp_path()
            .keep()
            .map_err(|e| RenderError::Io(e.error))?;
        figure.save(&path, &self.config)?;

        let mut command = viewer_command(&path);
        let viewer = format!("{:?}", command.get_program());
        debug!("Opening {} with {}", path.display(), viewer);
        command
            .spawn()
            .map_err(|source| RenderError::Viewer { viewer, source })?;
        Ok(())
    }
}

fn viewer_command(path: &Path) -> Command {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command.arg(path);
    command
}

/// Register a font for text rendering.
///
/// Returns whether titles and labels can be drawn. The first call decides for
/// the whole process: a different `preferred` font passed later is ignored.
pub fn ensure_font(preferred: Option<&Path>) -> bool {
    *FONT_LOADED.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_SEARCH_PATHS.iter().map(PathBuf::from));
        for candidate in candidates {
            let Ok(bytes) = std::fs::read(&candidate) else {
                continue;
            };
            // plotters keeps a 'static reference to registered font data.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    debug!("Using font {}", candidate.display());
                    return true;
                }
                Err(_) => warn!("Unusable font {}", candidate.display()),
            }
        }
        error!(
            "No TrueType font found (use -f <font.ttf>); figure titles, labels and the differing-bit total are not drawn"
        );
        false
    })
}

fn backend_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Backend(err.to_string())
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    text: bool,
) -> RenderResult<()> {
    root.fill(&WHITE).map_err(backend_error)?;
    let frames = figure.frames().max(1) as u32;
    let areas = root.split_evenly((figure.panels.len(), 1));

    for (index, (area, panel)) in areas.iter().zip(figure.panels.iter()).enumerate() {
        let bottom = index + 1 == figure.panels.len();

        let mut builder = ChartBuilder::on(area);
        builder.margin(8);
        if text {
            builder
                .caption(&panel.title, (FONT_FAMILY, TITLE_FONT_SIZE).into_font())
                .y_label_area_size(60)
                .x_label_area_size(if bottom { 40 } else { 20 });
        }
        let mut chart = builder
            .build_cartesian_2d(0..frames, 0..FINGERPRINT_BITS as u32)
            .map_err(backend_error)?;

        if text {
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .y_labels(5)
                .y_desc(BIT_AXIS_LABEL)
                .label_style((FONT_FAMILY, LABEL_FONT_SIZE).into_font());
            if bottom {
                mesh.x_desc(FRAME_AXIS_LABEL);
            }
            mesh.draw().map_err(backend_error)?;
        }

        chart
            .draw_series(panel.bits.ones().map(|(frame, bit)| {
                let (x, y) = (frame as u32, bit as u32);
                Rectangle::new([(x, y), (x + 1, y + 1)], BLACK.filled())
            }))
            .map_err(backend_error)?;
    }

    root.present().map_err(backend_error)?;
    Ok(())
}
