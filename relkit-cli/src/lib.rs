//! Command implementations shared by the `update-version` and
//! `validate-localization` binaries.

pub mod localization;
pub mod logging;
pub mod version;
