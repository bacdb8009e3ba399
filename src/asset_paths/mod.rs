//! Rewriting of authoring-time asset references into runtime paths.
//!
//! Authored documents point at images through absolute paths on the author's machine. The
//! submodules split that work into reference classification (`filters`), directory marker
//! handling (`markers`), the ordered rule chain (`rules`) and attribute-level document
//! rewriting (`rewriter`), so each piece can be tested against literal fragments.

mod filters;
mod markers;
mod rewriter;
mod rules;

pub use filters::{IMAGE_EXTENSIONS, has_image_extension, is_absolute_reference, is_external_reference};
pub use markers::{directory_markers, join_asset_path};
pub use rewriter::AssetPathRewriter;
pub use rules::{AssetRule, AssetTarget, BareFilenameRule, DirectoryQualifiedRule, default_rules};
