//! Calendar export of day plans.

mod ics;

pub use ics::{encode, export_filename, IcsEncoder, ICS_MEDIA_TYPE};
