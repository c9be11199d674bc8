//! In-memory document assembled from rendered fragments.
//!
//! Loads the head and body fragments left behind by the renderer plus a
//! stylesheet, without a browser and without evaluating any embedded
//! scripts. Tests that need page initialization call into the page's
//! initialization code directly instead of executing fetched script text.

use crate::error::Result;
use crate::render::{BODY_FRAGMENT, HEAD_FRAGMENT};
use std::fs;
use std::path::Path;

/// A server-rendered page held in memory for assertions
#[derive(Debug, Clone)]
pub struct TestDocument {
    head: String,
    body: String,
    stylesheet: String,
}

impl TestDocument {
    /// Load `head.html` and `body.html` from `fragment_dir` together with
    /// the stylesheet at `stylesheet_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three files cannot be read.
    pub fn load(fragment_dir: &Path, stylesheet_path: &Path) -> Result<Self> {
        let head = fs::read_to_string(fragment_dir.join(HEAD_FRAGMENT))?;
        let body = fs::read_to_string(fragment_dir.join(BODY_FRAGMENT))?;
        let stylesheet = fs::read_to_string(stylesheet_path)?;
        Ok(Self {
            head,
            body,
            stylesheet,
        })
    }

    /// The head fragment markup
    #[must_use]
    pub fn head(&self) -> &str {
        &self.head
    }

    /// The body fragment markup
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The stylesheet contents
    #[must_use]
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Whether the page contains an audio output element.
    ///
    /// This feeds the availability decision when constructing a sync
    /// controller for the page under test.
    #[must_use]
    pub fn has_audio_element(&self) -> bool {
        self.body.to_ascii_lowercase().contains("<audio")
    }

    /// Contents of inline script tags across head and body.
    ///
    /// Exposed for assertions only; nothing here is ever evaluated.
    #[must_use]
    pub fn inline_scripts(&self) -> Vec<String> {
        let mut scripts = extract_scripts(&self.head);
        scripts.extend(extract_scripts(&self.body));
        scripts
    }
}

/// Pull the text between `<script...>` and `</script>` pairs out of `html`
fn extract_scripts(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut scripts = Vec::new();
    let mut cursor = 0;

    while let Some(open) = lower[cursor..].find("<script") {
        let open = cursor + open;
        let Some(tag_end) = lower[open..].find('>') else {
            break;
        };
        let content_start = open + tag_end + 1;
        let Some(close) = lower[content_start..].find("</script") else {
            break;
        };
        scripts.push(html[content_start..content_start + close].to_owned());
        cursor = content_start + close;
    }

    scripts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_document(head: &str, body: &str, css: &str) -> tempfile::TempDir {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("tempdir");
        };
        for (name, content) in [(HEAD_FRAGMENT, head), (BODY_FRAGMENT, body), ("style.css", css)]
        {
            let Ok(mut file) = fs::File::create(dir.path().join(name)) else {
                unreachable!("create fixture file");
            };
            let Ok(()) = file.write_all(content.as_bytes()) else {
                unreachable!("write fixture file");
            };
        }
        dir
    }

    #[test]
    fn test_load_reads_all_parts() {
        let dir = write_document("<title>musiq</title>", "<div></div>", "body { color: red; }");
        let Ok(document) = TestDocument::load(dir.path(), &dir.path().join("style.css")) else {
            unreachable!("document must load");
        };
        assert_eq!(document.head(), "<title>musiq</title>");
        assert_eq!(document.body(), "<div></div>");
        assert_eq!(document.stylesheet(), "body { color: red; }");
    }

    #[test]
    fn test_load_fails_on_missing_fragment() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("tempdir");
        };
        assert!(TestDocument::load(dir.path(), &dir.path().join("style.css")).is_err());
    }

    #[test]
    fn test_audio_element_detection() {
        let with = write_document("", r#"<audio preload="none"></audio>"#, "");
        let without = write_document("", "<div>no player here</div>", "");

        let Ok(with) = TestDocument::load(with.path(), &with.path().join("style.css")) else {
            unreachable!("document must load");
        };
        let Ok(without) = TestDocument::load(without.path(), &without.path().join("style.css"))
        else {
            unreachable!("document must load");
        };
        assert!(with.has_audio_element());
        assert!(!without.has_audio_element());
    }

    #[test]
    fn test_inline_scripts_extracted_not_evaluated() {
        let dir = write_document(
            r#"<script type="text/javascript">var urls = {};</script>"#,
            "<script>init();</script><p>text</p>",
            "",
        );
        let Ok(document) = TestDocument::load(dir.path(), &dir.path().join("style.css")) else {
            unreachable!("document must load");
        };
        assert_eq!(
            document.inline_scripts(),
            vec!["var urls = {};".to_owned(), "init();".to_owned()]
        );
    }

    #[test]
    fn test_unclosed_script_ignored() {
        let dir = write_document("<script>half", "", "");
        let Ok(document) = TestDocument::load(dir.path(), &dir.path().join("style.css")) else {
            unreachable!("document must load");
        };
        assert!(document.inline_scripts().is_empty());
    }
}
