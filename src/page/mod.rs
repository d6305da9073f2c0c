pub mod composer;
pub mod fragments;

pub use composer::compose;
pub use fragments::{FragmentSet, ResolvedFragment, Section};
