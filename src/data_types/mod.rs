pub mod annotations;
pub mod data;
pub mod plot_configs;

pub use annotations::*;
pub use data::*;
pub use plot_configs::*;
