use std::{
    ffi::OsStr,
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    domain::{Environment, Requirement, RequirementKind, Span},
    storage::{MergeError, discovery, merge},
};

/// Detects `//= require <name>` and `//= require "name"` lines.
///
/// Leading horizontal whitespace on the declaration's own line is part of
/// the match, so a splice removes the indentation along with the
/// declaration. The newline terminating the previous line is not consumed,
/// which keeps line structure intact when content is spliced in.
static JS_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[ \t]*//=[ \t]+require[ \t]+([<"])(\S+)[>"][ \t]*"#)
        .expect("literal pattern must compile")
});

/// Detects `@import url("name")` statements. There is no angle-bracket
/// form for CSS; these are always local references.
static CSS_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import url\((")(\S+)"\)"#).expect("literal pattern must compile")
});

/// Content classification of a resource, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A JavaScript source file (`.js` or `.javascript`).
    Javascript,
    /// A CSS stylesheet (`.css`).
    Css,
    /// Any other file. Unknown resources are never scanned.
    Unknown,
}

impl ResourceKind {
    /// Classifies a lower-cased extension (without the leading dot).
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "js" | "javascript" => Self::Javascript,
            "css" => Self::Css,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Javascript => write!(f, "javascript"),
            Self::Css => write!(f, "css"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Error returned when a [`Resource`] cannot be constructed.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The path argument was empty.
    #[error("a resource must be created with a non-empty path")]
    EmptyPath,
    /// The file exists but could not be read.
    #[error("failed to read {path}")]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A file on disk, existing or not yet created.
///
/// Construction is eager: classification is derived from the path alone,
/// then the file content (if the path exists) is read and scanned for
/// [`Requirement`] declarations. A resource is immutable afterwards; only
/// [`exists`](Self::exists) goes back to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: PathBuf,
    extension: String,
    kind: ResourceKind,
    base_name: String,
    content: Option<String>,
    requirements: Option<Vec<Requirement>>,
}

impl Resource {
    /// Creates a resource for the file at `path`.
    ///
    /// The path does not have to exist; a resource over an absent file has
    /// no content and no requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyPath`] if `path` is empty, and
    /// [`ResourceError::Io`] if the file exists but cannot be read.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ResourceError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ResourceError::EmptyPath);
        }

        let extension = parse_extension(&path);
        let kind = ResourceKind::from_extension(&extension);
        let base_name = parse_base_name(&path);
        let content = read_content(&path)?;
        let requirements = scan_requirements(kind, content.as_deref());

        Ok(Self {
            path,
            extension,
            kind,
            base_name,
            content,
            requirements,
        })
    }

    /// The path at which the file is, or will be, located.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The lower-cased file extension without the leading dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The content classification derived from the extension.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The normalised name used to match requirements against this
    /// resource.
    ///
    /// The file stem is lower-cased, a trailing `-min` marker is removed,
    /// and a trailing version token is stripped at the last hyphen:
    /// `jQuery-1.2.3.js` has the base name `jquery`.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The file content captured at construction time, or `None` if the
    /// file did not exist.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The dependency declarations found in the content.
    ///
    /// `None` when the resource was not scanned (unknown kind or absent
    /// content) and also when a scan found nothing.
    #[must_use]
    pub fn requirements(&self) -> Option<&[Requirement]> {
        self.requirements.as_deref()
    }

    /// Whether the file currently exists on disk.
    ///
    /// Checked on every call rather than captured at construction.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Discovers every resource of `kind` under the environment's roots.
    ///
    /// Roots are walked recursively in the order the environment lists
    /// them; within one root the walk is sorted by file name, so discovery
    /// order is deterministic. Returns `Ok(None)` when nothing matched,
    /// never an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read.
    pub fn find_all_of_kind(
        kind: ResourceKind,
        environment: &Environment,
    ) -> Result<Option<Vec<Self>>, ResourceError> {
        discovery::find_all_of_kind(kind, environment)
    }

    /// Resolves this resource's requirements against `environment` and
    /// writes the merged result to `output_path`.
    ///
    /// Each requirement is matched against the discovered pool by base
    /// name; the first match in discovery order wins and its content
    /// replaces the declaration text. Unresolved declarations are left in
    /// place. A resource without requirements is copied byte for byte.
    /// The parent directory of `output_path` is created if needed, and any
    /// existing output file is overwritten.
    ///
    /// # Errors
    ///
    /// Fails if this resource has no content, if discovery fails, or if
    /// the output cannot be written.
    pub fn merge_requirements_from_environment(
        &self,
        environment: &Environment,
        output_path: &Path,
    ) -> Result<(), MergeError> {
        merge::merge_into(self, environment, output_path)
    }
}

fn parse_extension(path: &Path) -> String {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn parse_base_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
    let name = stem.to_lowercase();
    let name = name.strip_suffix("-min").unwrap_or(&name);
    // Anything after the last hyphen is taken to be a version token.
    match name.rfind('-') {
        Some(index) => name[..index].to_string(),
        None => name.to_string(),
    }
}

fn read_content(path: &Path) -> Result<Option<String>, ResourceError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ResourceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn scan_requirements(kind: ResourceKind, content: Option<&str>) -> Option<Vec<Requirement>> {
    let content = content?;
    let pattern: &Regex = match kind {
        ResourceKind::Javascript => &JS_REQUIRE,
        ResourceKind::Css => &CSS_IMPORT,
        ResourceKind::Unknown => return None,
    };

    let requirements: Vec<_> = pattern
        .captures_iter(content)
        .map(|captures| {
            let matched = captures.get(0).expect("whole match always present");
            let kind = if &captures[1] == "<" {
                RequirementKind::Global
            } else {
                RequirementKind::Local
            };
            Requirement::from_scan(
                captures[2].to_string(),
                kind,
                Span::new(matched.start(), matched.end()),
            )
        })
        .collect();

    if requirements.is_empty() {
        None
    } else {
        Some(requirements)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn path_is_kept_verbatim() {
        let resource = Resource::new("some/file/name.txt").unwrap();
        assert_eq!(resource.path(), Path::new("some/file/name.txt"));
    }

    #[test]
    fn empty_path_is_rejected() {
        let result = Resource::new("");
        assert!(matches!(result.unwrap_err(), ResourceError::EmptyPath));
    }

    #[test]
    fn extension_is_lower_cased_without_dot() {
        let cases = [
            ("/var/someFile.js", "js"),
            ("someFile.JS", "js"),
            ("noExtension", ""),
            ("someFile.SomECraZytype", "somecrazytype"),
        ];
        for (path, expected) in cases {
            let resource = Resource::new(path).unwrap();
            assert_eq!(resource.extension(), expected, "extension of {path}");
        }
    }

    #[test]
    fn kind_is_derived_from_extension() {
        let cases = [
            ("file.someCrazyThing", ResourceKind::Unknown),
            ("file.Js", ResourceKind::Javascript),
            ("file.JS", ResourceKind::Javascript),
            ("file.awesome.js", ResourceKind::Javascript),
            ("file.JavaScript", ResourceKind::Javascript),
            ("file.css", ResourceKind::Css),
            ("FILE.CSS", ResourceKind::Css),
            ("someFile", ResourceKind::Unknown),
        ];
        for (path, expected) in cases {
            let resource = Resource::new(path).unwrap();
            assert_eq!(resource.kind(), expected, "kind of {path}");
        }
    }

    #[test]
    fn base_name_strips_version_and_minification_markers() {
        let cases = [
            ("/usr/local/file.js", "file"),
            ("FILE.JS", "file"),
            ("some-Plugin-2.3.2-min.js", "some-plugin"),
            ("jQuery-1.2.3.js", "jquery"),
            ("OpenLayers.js", "openlayers"),
        ];
        for (path, expected) in cases {
            let resource = Resource::new(path).unwrap();
            assert_eq!(resource.base_name(), expected, "base name of {path}");
        }
    }

    #[test]
    fn absent_file_has_no_content_and_no_requirements() {
        let resource = Resource::new("does/not/exist.js").unwrap();
        assert!(resource.content().is_none());
        assert!(resource.requirements().is_none());
        assert!(!resource.exists());
    }

    #[test]
    fn exists_rechecks_disk_after_construction() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.js");

        let resource = Resource::new(&path).unwrap();
        assert!(!resource.exists());

        fs::write(&path, "var foo = {};").unwrap();
        assert!(resource.exists());
    }

    #[test]
    fn content_is_read_at_construction() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.js");
        fs::write(&path, "var foo = {};").unwrap();

        let resource = Resource::new(&path).unwrap();
        assert_eq!(resource.content(), Some("var foo = {};"));
    }

    #[test]
    fn plain_content_yields_no_requirements() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.js");
        fs::write(&path, "var foo = {};").unwrap();

        let resource = Resource::new(&path).unwrap();
        assert!(resource.requirements().is_none());
    }

    #[test]
    fn unknown_kind_is_never_scanned() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.html");
        fs::write(&path, "//= require <jquery>\n").unwrap();

        let resource = Resource::new(&path).unwrap();
        assert!(resource.content().is_some());
        assert!(resource.requirements().is_none());
    }

    #[test]
    fn javascript_requirements_are_found_with_exact_spans() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.js");
        let content =
            "//= require <jquery>\nvar foo = {};//= require \"openlayers\"\n var s = \"some other thing\"\n";
        fs::write(&path, content).unwrap();

        let resource = Resource::new(&path).unwrap();
        let requirements = resource.requirements().unwrap();

        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0].name(), "jquery");
        assert_eq!(requirements[0].kind(), RequirementKind::Global);
        assert_eq!(requirements[0].span(), Span::new(0, 20));
        assert_eq!(requirements[1].name(), "openlayers");
        assert_eq!(requirements[1].kind(), RequirementKind::Local);
        assert_eq!(requirements[1].span(), Span::new(34, 58));
    }

    #[test]
    fn css_import_statements_are_found_as_requirements() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.css");
        let content = "h1 {background:red;}\n @import url(\"something.css\")";
        fs::write(&path, content).unwrap();

        let resource = Resource::new(&path).unwrap();
        let requirements = resource.requirements().unwrap();

        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements[0].name(), "something.css");
        assert_eq!(requirements[0].kind(), RequirementKind::Local);
        assert_eq!(requirements[0].span(), Span::new(22, 50));
    }

    #[test]
    fn indented_declaration_includes_its_indentation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.js");
        let content = "a();\n  //= require <widget>\nb();\n";
        fs::write(&path, content).unwrap();

        let resource = Resource::new(&path).unwrap();
        let requirements = resource.requirements().unwrap();

        // The two indent spaces belong to the span; the newline at offset 4
        // does not.
        assert_eq!(requirements[0].span(), Span::new(5, 27));
    }

    #[test]
    fn malformed_declarations_are_not_detected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.js");
        fs::write(&path, "//= require jquery\n// require <jquery>\n").unwrap();

        let resource = Resource::new(&path).unwrap();
        assert!(resource.requirements().is_none());
    }
}
