pub mod host;
pub mod script;
pub mod session;

pub use host::{SimHost, SimWindow};
pub use script::{Script, Step};
pub use session::{Session, SessionError, Snapshot, replay};

/// Script replayed by `perch demo`.
pub const DEMO_SCRIPT: &str = include_str!("demo.toml");

/// Parses the built-in demo script.
pub fn demo_script() -> Result<Script, String> {
    Script::parse(DEMO_SCRIPT)
}
