//! Lights Off puzzle: field mapping, solving and presentation I/O

pub mod io;
pub mod mapper;
pub mod problem;
pub mod render;

pub use io::{
    create_example_fields, load_field_from_file, load_fields_from_directory, parse_field,
    read_field, save_field_to_file,
};
pub use mapper::{all_lit, apply_presses, build_system, pressed, verify};
pub use problem::{solve, LightsOffProblem, SolveReport, SolveSummary};
pub use render::save_image;
