// Palette gradient rendering shared by the CLI and the GUI
pub mod color;
pub mod error;
pub mod gradient;
pub mod io;
pub mod session;
pub mod view;

pub use color::{adjust, AdjustmentParameters, Color};
pub use error::GradientError;
pub use gradient::{compose, sample_palette, PaletteEntry, PaletteReport, BLOCK_WIDTH, GRADIENT_DEPTH};
pub use io::{is_image_file, load_image, save_png};
pub use session::Session;
pub use view::ViewState;
