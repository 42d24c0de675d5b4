//! Employee record model, fixed vocabularies, and the record synthesizer
//! shared by the roster-bench generator and server.

mod record;
mod synthesizer;
pub mod vocab;

pub use record::Employee;
pub use synthesizer::{Synthesizer, DOB_WINDOW_MS};
