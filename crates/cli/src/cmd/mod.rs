mod build;
mod info;

pub use build::cmd_build;
pub use info::cmd_info;
