//! The file formats relkit reads and writes.
//!
//! - [`pbxproj`]: build settings inside an Xcode project file.
//! - [`strings`]: Apple `.strings` localization tables.

pub mod pbxproj;
pub mod strings;

pub use pbxproj::{ProjectFile, Setting};
pub use strings::{Pair, StringsFile};
