#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! A 3×3×3 cube model and a layer-by-layer solver for it.
//!
//! ```
//! use cube3::{Cube3, CubeState};
//!
//! let scrambled: CubeState = "rbwyywogr yryorygyg bgbogoybw orwwowgyb grbrbbrgy rboowwwgo"
//!     .parse()
//!     .unwrap();
//! let mut cube = Cube3::new(scrambled);
//! cube.solve().unwrap();
//! assert!(cube.state().is_solved());
//! println!("{} moves", cube.moves_performed().len());
//! ```

pub mod config;
pub mod cube;
pub mod geometry;
pub mod legality;
pub mod locator;
pub mod moves;
pub mod search;
pub mod solver;
pub mod state;

pub use config::{ConfigError, SolverConfig};
pub use cube::{ActionObserver, Cube3};
pub use geometry::{Face, Facelet, Point};
pub use legality::{IllegalStateError, check_legality};
pub use moves::{Action, ParseActionError, apply_action, apply_sequence, parse_sequence};
pub use solver::{FIRST_LAYER_CORNERS, MIDDLE_LAYER_EDGES, SolveError, Stage};
pub use state::{Color, CubeState, ParseStateError, Pattern};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
