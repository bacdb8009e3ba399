use std::collections::BTreeSet;

/// Expand a module's canonical directory name into the forms it may take inside an
/// authored path.
///
/// Design tools write folder names either verbatim or percent-encoded, so both spellings
/// are produced. The result is deterministic and free of duplicates; an empty directory
/// name produces no markers at all.
pub fn directory_markers(directory_name: &str) -> Vec<String> {
    let mut builder = MarkerBuilder::new(directory_name);

    builder.add_verbatim_marker();
    builder.add_encoded_marker();

    builder.finish()
}

struct MarkerBuilder<'a> {
    trimmed: Option<&'a str>,
    seen: BTreeSet<String>,
    result: Vec<String>,
}

impl<'a> MarkerBuilder<'a> {
    fn new(directory_name: &'a str) -> Self {
        let trimmed_value = directory_name.trim_matches(['/', '\\']);
        let trimmed = if trimmed_value.is_empty() {
            None
        } else {
            Some(trimmed_value)
        };

        Self {
            trimmed,
            seen: BTreeSet::new(),
            result: Vec::new(),
        }
    }

    fn add_verbatim_marker(&mut self) {
        if let Some(name) = self.trimmed {
            self.push(name.to_string());
        }
    }

    fn add_encoded_marker(&mut self) {
        if let Some(name) = self.trimmed {
            self.push(name.replace(' ', "%20"));
        }
    }

    fn finish(self) -> Vec<String> {
        self.result
    }

    fn push(&mut self, marker: String) {
        if self.seen.insert(marker.clone()) {
            self.result.push(marker);
        }
    }
}

/// Locate the file name that immediately follows a directory marker inside `path`.
///
/// The marker has to occupy a whole path segment and be followed by exactly one more
/// segment, so `Old Module 1/a.png` and `Module 1/sub/a.png` do not match `Module 1`.
pub fn file_after_marker<'p>(path: &'p str, marker: &str) -> Option<&'p str> {
    if marker.is_empty() {
        return None;
    }

    let mut search_from = 0;
    while let Some(offset) = path[search_from..].find(marker) {
        let start = search_from + offset;
        let end = start + marker.len();
        search_from = end;

        let on_boundary = start == 0 || matches!(path.as_bytes()[start - 1], b'/' | b'\\');
        if !on_boundary {
            continue;
        }

        let Some(rest) = path[end..]
            .strip_prefix('/')
            .or_else(|| path[end..].strip_prefix('\\'))
        else {
            continue;
        };

        if !rest.is_empty() && !rest.contains(['/', '\\']) {
            return Some(rest);
        }
    }

    None
}

/// Final segment of a path, treating both slash styles as separators.
pub fn final_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Join a file name onto an asset directory using forward slashes.
pub fn join_asset_path(asset_directory: &str, file_name: &str) -> String {
    format!(
        "{}/{}",
        asset_directory.trim_end_matches(['/', '\\']),
        file_name
    )
}
