use crate::utils::errors::{CertPortalError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Stylesheet every page references
pub const BASE_STYLESHEET: &str = "style.css";
/// Optional site-specific stylesheet, referenced only when present
pub const CUSTOM_STYLESHEET: &str = "custom.css";

/// The three sections of the portal page, each independently overridable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Content,
    Footer,
}

impl Section {
    /// Page order: header, content, footer
    pub const ALL: [Section; 3] = [Section::Header, Section::Content, Section::Footer];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Content => "content",
            Section::Footer => "footer",
        }
    }

    /// Site-specific override file for this section
    pub fn custom_file(&self) -> &'static str {
        match self {
            Section::Header => "custom_header.html",
            Section::Content => "custom_content.html",
            Section::Footer => "custom_footer.html",
        }
    }

    /// Shipped fallback file for this section
    pub fn default_file(&self) -> &'static str {
        match self {
            Section::Header => "default_header.html",
            Section::Content => "default_content.html",
            Section::Footer => "default_footer.html",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A section resolved to the file that will render it
#[derive(Debug, Clone)]
pub struct ResolvedFragment {
    pub section: Section,
    pub file_name: &'static str,
    pub custom: bool,
    pub html: String,
}

/// Resolves page fragments from a site directory. Resolution is
/// per-section: a custom variant wins when present, the default is the
/// fallback, and a missing default cannot be recovered from.
pub struct FragmentSet {
    site_dir: PathBuf,
}

impl FragmentSet {
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: site_dir.into(),
        }
    }

    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Resolve a single section to its winning variant
    pub fn resolve(&self, section: Section) -> Result<ResolvedFragment> {
        let custom_path = self.site_dir.join(section.custom_file());
        if custom_path.exists() {
            tracing::debug!("Using custom {} fragment: {}", section, custom_path.display());
            return Ok(ResolvedFragment {
                section,
                file_name: section.custom_file(),
                custom: true,
                html: fs::read_to_string(&custom_path)?,
            });
        }

        let default_path = self.site_dir.join(section.default_file());
        if !default_path.exists() {
            return Err(CertPortalError::Config(format!(
                "Missing default {} fragment: {}",
                section,
                default_path.display()
            )));
        }

        Ok(ResolvedFragment {
            section,
            file_name: section.default_file(),
            custom: false,
            html: fs::read_to_string(&default_path)?,
        })
    }

    /// Resolve all sections in page order
    pub fn resolve_all(&self) -> Result<Vec<ResolvedFragment>> {
        Section::ALL.iter().map(|s| self.resolve(*s)).collect()
    }

    /// Stylesheet references for the page head, in link order
    pub fn stylesheets(&self) -> Vec<&'static str> {
        let mut sheets = vec![BASE_STYLESHEET];
        if self.site_dir.join(CUSTOM_STYLESHEET).exists() {
            sheets.push(CUSTOM_STYLESHEET);
        }
        sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_site(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cert_portal_site_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        for section in Section::ALL {
            fs::write(
                dir.join(section.default_file()),
                format!("<div>default {section}</div>\n"),
            )
            .unwrap();
        }
        dir
    }

    #[test]
    fn test_resolve_defaults_when_no_custom_files() {
        let dir = temp_site("defaults");
        let set = FragmentSet::new(&dir);

        for section in Section::ALL {
            let fragment = set.resolve(section).unwrap();
            assert!(!fragment.custom);
            assert_eq!(fragment.file_name, section.default_file());
            assert_eq!(fragment.html, format!("<div>default {section}</div>\n"));
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_custom_fragment_wins_per_section() {
        let dir = temp_site("custom_content");
        fs::write(dir.join("custom_content.html"), "<div>our forms</div>\n").unwrap();
        let set = FragmentSet::new(&dir);

        let content = set.resolve(Section::Content).unwrap();
        assert!(content.custom);
        assert_eq!(content.html, "<div>our forms</div>\n");

        // Other sections keep their defaults
        assert!(!set.resolve(Section::Header).unwrap().custom);
        assert!(!set.resolve(Section::Footer).unwrap().custom);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_default_is_config_error() {
        let dir = temp_site("missing_default");
        fs::remove_file(dir.join("default_footer.html")).unwrap();
        let set = FragmentSet::new(&dir);

        let result = set.resolve(Section::Footer);
        assert!(matches!(result, Err(CertPortalError::Config(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_resolve_all_preserves_page_order() {
        let dir = temp_site("order");
        let set = FragmentSet::new(&dir);

        let fragments = set.resolve_all().unwrap();
        let sections: Vec<Section> = fragments.iter().map(|f| f.section).collect();
        assert_eq!(
            sections,
            vec![Section::Header, Section::Content, Section::Footer]
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stylesheets_include_custom_only_when_present() {
        let dir = temp_site("stylesheets");
        let set = FragmentSet::new(&dir);
        assert_eq!(set.stylesheets(), vec![BASE_STYLESHEET]);

        fs::write(dir.join(CUSTOM_STYLESHEET), "body { color: green; }\n").unwrap();
        assert_eq!(set.stylesheets(), vec![BASE_STYLESHEET, CUSTOM_STYLESHEET]);

        let _ = fs::remove_dir_all(&dir);
    }
}
