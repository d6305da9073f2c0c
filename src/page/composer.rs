use crate::page::fragments::FragmentSet;
use crate::utils::errors::Result;

const PAGE_TITLE: &str = "Certificate Download";

/// Assemble the complete portal page from a site directory: resolved
/// fragments concatenated verbatim inside a fixed document shell.
pub fn compose(fragments: &FragmentSet) -> Result<String> {
    let resolved = fragments.resolve_all()?;

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));

    for sheet in fragments.stylesheets() {
        page.push_str(&format!(
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"{sheet}\">\n"
        ));
    }

    page.push_str("</head>\n<body>\n");
    for fragment in &resolved {
        page.push_str(&fragment.html);
    }
    page.push_str("</body>\n</html>\n");

    tracing::debug!(
        "Composed page from {} ({} fragments)",
        fragments.site_dir().display(),
        resolved.len()
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fragments::Section;
    use crate::utils::errors::CertPortalError;
    use std::fs;
    use std::path::PathBuf;

    fn temp_site(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cert_portal_compose_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("default_header.html"), "<h1>Storage Portal</h1>\n").unwrap();
        fs::write(dir.join("default_content.html"), "<form>forms</form>\n").unwrap();
        fs::write(dir.join("default_footer.html"), "<p>footer</p>\n").unwrap();
        dir
    }

    #[test]
    fn test_compose_renders_defaults_verbatim_in_order() {
        let dir = temp_site("defaults");
        let page = compose(&FragmentSet::new(&dir)).unwrap();

        let header_pos = page.find("<h1>Storage Portal</h1>").unwrap();
        let content_pos = page.find("<form>forms</form>").unwrap();
        let footer_pos = page.find("<p>footer</p>").unwrap();
        assert!(header_pos < content_pos && content_pos < footer_pos);

        // Single document shell around the fragments
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("href=\"style.css\""));
        assert!(!page.contains("custom.css"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compose_uses_custom_content_with_default_frame() {
        let dir = temp_site("custom");
        fs::write(dir.join("custom_content.html"), "<form>site forms</form>\n").unwrap();

        let page = compose(&FragmentSet::new(&dir)).unwrap();
        assert!(page.contains("<form>site forms</form>"));
        assert!(!page.contains("<form>forms</form>"));
        assert!(page.contains("<h1>Storage Portal</h1>"));
        assert!(page.contains("<p>footer</p>"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compose_links_custom_stylesheet_when_present() {
        let dir = temp_site("css");
        fs::write(dir.join("custom.css"), "h1 { color: orange; }\n").unwrap();

        let page = compose(&FragmentSet::new(&dir)).unwrap();
        let base_pos = page.find("href=\"style.css\"").unwrap();
        let custom_pos = page.find("href=\"custom.css\"").unwrap();
        assert!(base_pos < custom_pos);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compose_fails_without_default_fragment() {
        let dir = temp_site("fatal");
        fs::remove_file(dir.join(Section::Content.default_file())).unwrap();

        let result = compose(&FragmentSet::new(&dir));
        assert!(matches!(result, Err(CertPortalError::Config(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compose_shipped_site_defaults() {
        // The defaults shipped with the crate must always render
        let site = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("site");
        let page = compose(&FragmentSet::new(&site)).unwrap();

        assert!(page.contains("name=\"t\""));
        assert!(page.contains("name=\"exp\""));
        assert!(page.contains("</html>"));
    }
}
