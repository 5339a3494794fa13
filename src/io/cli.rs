//! Command-line interface: load an image, extract tiles, solve and export

use crate::algorithm::solver::{StepOutcome, WaveFunctionCollapse};
use crate::algorithm::steps::WfcStep;
use crate::analysis::extraction::{ExtractionSettings, SilentObserver};
use crate::analysis::patterns::ImageProcessor;
use crate::io::configuration::{
    DEFAULT_MAX_STEPS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_SEED,
    DEFAULT_TILE_SIZE, GIF_FRAME_DELAY_MS, MAX_GRID_DIMENSION, MAX_TILE_SIZE, OUTPUT_SUFFIX,
    PROGRESS_REFRESH_STEPS, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "wfc-tiles")]
#[command(
    author,
    version,
    about = "Fill a grid with tiles sampled from an image using wave function collapse"
)]
/// Command-line arguments for the tile generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image to sample tiles from
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Side length of sampled tiles in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Sample windows at every pixel, wrapping around image edges
    #[arg(short = 'l', long = "loop")]
    pub loop_edges: bool,

    /// Include horizontally and vertically mirrored tiles
    #[arg(short, long)]
    pub flip: bool,

    /// Include tiles rotated by 90°, 180° and 270°
    #[arg(short, long)]
    pub rotate: bool,

    /// Output width in cells
    #[arg(short, long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Maximum solver steps before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Output PNG path (defaults to <input>_wfc.png next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write an animated GIF of the solve
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print every executed step
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Extraction settings selected on the command line
    pub const fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            tile_size: self.tile_size,
            loop_edges: self.loop_edges,
            include_flipped: self.flip,
            include_rotated: self.rotate,
        }
    }

    /// Reject parameters outside the supported ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending argument
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 || self.tile_size > MAX_TILE_SIZE {
            return Err(invalid_parameter(
                "tile-size",
                &self.tile_size,
                &format!("must be between 1 and {MAX_TILE_SIZE}"),
            ));
        }

        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if self.max_steps == 0 {
            return Err(invalid_parameter(
                "max-steps",
                &self.max_steps,
                &"must be at least 1",
            ));
        }

        Ok(())
    }

    /// Where the rendered grid is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.target, OUTPUT_SUFFIX, "png"))
    }

    /// Where the animation is written
    pub fn visualization_path(&self) -> PathBuf {
        sibling_path(&self.output_path(), VISUALIZATION_SUFFIX, "gif")
    }
}

fn sibling_path(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Runs one extraction and solve from parsed arguments
///
/// Stops at the first solver error: the grid has no rollback, so a failed
/// step is reported and never retried.
pub struct Runner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Extract, solve and export according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parameters are invalid or the image cannot be loaded
    /// - Extraction fails or yields no tiles
    /// - A solver step fails or the step limit is reached
    /// - The result cannot be written
    // Allow print for user feedback on progress and results
    #[allow(clippy::print_stderr)]
    pub fn run(&mut self) -> Result<WaveFunctionCollapse> {
        self.cli.validate()?;
        let start_time = Instant::now();

        let image_processor = ImageProcessor::from_png_file(&self.cli.target)?;
        let settings = self.cli.extraction_settings();
        let tiles = match self.progress_manager.as_mut() {
            Some(pm) => image_processor.extract_tiles(settings, pm)?,
            None => image_processor.extract_tiles(settings, &mut SilentObserver)?,
        };

        if tiles.is_empty() {
            return Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"image yielded no tiles",
            ));
        }

        if !self.cli.quiet {
            eprintln!(
                "Extracted {} tiles from {}x{} image",
                tiles.len(),
                image_processor.width(),
                image_processor.height()
            );
        }

        let mut solver =
            WaveFunctionCollapse::from_tiles(tiles, self.cli.width, self.cli.height, self.cli.seed);
        let mut visualization = self.cli.visualize.then(|| {
            VisualizationCapture::new(self.cli.width, self.cli.height, self.cli.width * self.cli.height)
        });

        let result = self.drive(&mut solver, visualization.as_mut());

        if let Some(ref pm) = self.progress_manager {
            let message = match &result {
                Ok(steps) => format!("solved in {steps} steps"),
                Err(error) => format!("stopped: {error}"),
            };
            pm.finish_solving(message);
            pm.finish();
        }
        let steps = result?;

        let output_path = self.cli.output_path();
        export_grid_as_png(&solver.render()?, &output_path)?;

        if let Some(ref viz) = visualization {
            let gif_path = self.cli.visualization_path();
            viz.export_gif(&gif_path, GIF_FRAME_DELAY_MS)?;

            if !self.cli.quiet {
                let last_step = viz.frames().last().map_or(0, |frame| frame.step);
                eprintln!(
                    "Captured {} frames up to step {last_step} -> {}",
                    viz.frame_count(),
                    gif_path.display()
                );
            }
        }

        if !self.cli.quiet {
            eprintln!(
                "Solved {}x{} grid in {steps} steps ({:.2?}) -> {}",
                self.cli.width,
                self.cli.height,
                start_time.elapsed(),
                output_path.display()
            );
        }

        Ok(solver)
    }

    // Allow print for step tracing requested on the command line
    #[allow(clippy::print_stderr)]
    fn drive(
        &mut self,
        solver: &mut WaveFunctionCollapse,
        mut visualization: Option<&mut VisualizationCapture>,
    ) -> Result<usize> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_solving(solver.grid().len());
        }

        for executed in 1..=self.cli.max_steps {
            let outcome = solver.step()?;

            if self.cli.trace {
                if let Some(step) = solver.executed_steps().last() {
                    eprintln!("{executed:>8}  {step}");
                }
            }

            match outcome {
                StepOutcome::Solved => return Ok(executed),
                StepOutcome::Progressed(WfcStep::Collapse { .. }) => {
                    if let Some(viz) = visualization.as_deref_mut() {
                        viz.record_frame(executed, solver.render()?)?;
                    }
                }
                StepOutcome::Progressed(_) => {}
            }

            if executed % PROGRESS_REFRESH_STEPS == 0 {
                if let Some(ref pm) = self.progress_manager {
                    pm.update_solving(solver.collapsed_count(), executed);
                }
            }
        }

        Err(crate::io::error::AlgorithmError::StepLimitExceeded {
            steps: self.cli.max_steps,
            collapsed: solver.collapsed_count(),
            total: solver.grid().len(),
        })
    }
}
