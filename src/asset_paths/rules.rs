//! Ordered rewrite rules applied to each asset reference.

use super::filters::{has_image_extension, is_absolute_reference};
use super::markers::{directory_markers, file_after_marker, final_segment, join_asset_path};

/// Where rewritten references should point for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTarget {
    asset_directory: String,
    markers: Vec<String>,
}

impl AssetTarget {
    /// Build a target from the runtime asset directory and the module's canonical folder name.
    pub fn new(asset_directory: impl Into<String>, directory_name: &str) -> Self {
        Self {
            asset_directory: asset_directory.into(),
            markers: directory_markers(directory_name),
        }
    }

    /// Runtime directory rewritten references are anchored at.
    pub fn asset_directory(&self) -> &str {
        &self.asset_directory
    }

    /// Spellings of the module folder searched for inside authored paths.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Anchor a file name at the asset directory.
    pub fn resolve(&self, file_name: &str) -> String {
        join_asset_path(&self.asset_directory, file_name)
    }
}

/// One matcher/transformer pair in the rewrite chain.
///
/// Returning `None` passes the reference on to the next rule.
pub trait AssetRule: Send + Sync {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Produce the rewritten reference, or `None` when this rule does not apply.
    fn rewrite(&self, reference: &str, target: &AssetTarget) -> Option<String>;
}

/// Rewrites references whose path names the module's own asset folder.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryQualifiedRule;

impl AssetRule for DirectoryQualifiedRule {
    fn name(&self) -> &'static str {
        "directory-qualified"
    }

    fn rewrite(&self, reference: &str, target: &AssetTarget) -> Option<String> {
        target
            .markers()
            .iter()
            .find_map(|marker| file_after_marker(reference, marker))
            .map(|file_name| target.resolve(file_name))
    }
}

/// Rewrites absolute image paths that never mention the module folder.
#[derive(Debug, Default, Clone, Copy)]
pub struct BareFilenameRule;

impl AssetRule for BareFilenameRule {
    fn name(&self) -> &'static str {
        "bare-filename"
    }

    fn rewrite(&self, reference: &str, target: &AssetTarget) -> Option<String> {
        if !is_absolute_reference(reference) {
            return None;
        }

        let file_name = final_segment(reference);
        has_image_extension(file_name).then(|| target.resolve(file_name))
    }
}

/// The rule chain used unless a caller supplies its own.
pub fn default_rules() -> Vec<Box<dyn AssetRule>> {
    vec![Box::new(DirectoryQualifiedRule), Box::new(BareFilenameRule)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> AssetTarget {
        AssetTarget::new("/modules/Module 1", "Module 1")
    }

    #[test]
    fn directory_rule_discards_everything_before_marker() {
        let rewritten =
            DirectoryQualifiedRule.rewrite("/Users/ana/Desktop/Course/Module 1/diagram.png", &target());
        assert_eq!(rewritten.as_deref(), Some("/modules/Module 1/diagram.png"));
    }

    #[test]
    fn directory_rule_accepts_encoded_marker() {
        let rewritten =
            DirectoryQualifiedRule.rewrite("file:///Users/ana/Module%201/notes.pdf", &target());
        assert_eq!(rewritten.as_deref(), Some("/modules/Module 1/notes.pdf"));
    }

    #[test]
    fn directory_rule_skips_unrelated_paths() {
        assert!(DirectoryQualifiedRule.rewrite("/tmp/xyz/photo.jpg", &target()).is_none());
    }

    #[test]
    fn bare_rule_keeps_only_final_segment() {
        let rewritten = BareFilenameRule.rewrite("/Users/ana/temp/xyz/photo.jpg", &target());
        assert_eq!(rewritten.as_deref(), Some("/modules/Module 1/photo.jpg"));

        let rewritten = BareFilenameRule.rewrite("C:\\temp\\LOGO.PNG", &target());
        assert_eq!(rewritten.as_deref(), Some("/modules/Module 1/LOGO.PNG"));
    }

    #[test]
    fn bare_rule_ignores_non_images_and_relative_paths() {
        assert!(BareFilenameRule.rewrite("/Users/ana/data.json", &target()).is_none());
        assert!(BareFilenameRule.rewrite("images/photo.jpg", &target()).is_none());
        assert!(BareFilenameRule.rewrite("https://cdn.example.com/photo.jpg", &target()).is_none());
    }

    #[test]
    fn default_chain_is_ordered() {
        let names: Vec<&str> = default_rules().iter().map(|rule| rule.name()).collect();
        assert_eq!(names, vec!["directory-qualified", "bare-filename"]);
    }
}
