mod ids;
mod profile;

pub use ids::ProfileId;
pub use profile::{ArtworkRef, AudioLocator, Profile};
