use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::upload::LinkId;

static LINK_ID_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input type="hidden" name="link_id" id="link_id" value="([^"]*)" />"#)
        .expect("link_id pattern is valid")
});

/// Pulls the hidden `link_id` form value out of the Streamwo home page.
pub fn extract_link_id(home_page: &str) -> Option<LinkId> {
    LINK_ID_INPUT
        .captures(home_page)
        .and_then(|caps| caps.get(1))
        .map(|value| LinkId::new(value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <form id="upload_form" enctype="multipart/form-data" method="post">
    <input type="file" name="upload_file" id="upload_file" />
    <input type="hidden" name="link_id" id="link_id" value="abc123" />
  </form>
</body>
</html>"#;

    #[test]
    fn extracts_value_of_hidden_input() {
        assert_eq!(extract_link_id(HOME_PAGE), Some(LinkId::new("abc123")));
    }

    #[test]
    fn first_match_wins() {
        let page = format!(
            "{}\n<input type=\"hidden\" name=\"link_id\" id=\"link_id\" value=\"zzz\" />",
            HOME_PAGE
        );
        assert_eq!(extract_link_id(&page).unwrap().as_str(), "abc123");
    }

    #[test]
    fn missing_field_yields_none() {
        assert_eq!(extract_link_id("<html><body>maintenance</body></html>"), None);
        assert_eq!(extract_link_id(""), None);
    }

    #[test]
    fn layout_changes_break_the_match() {
        let reordered =
            r#"<input type="hidden" id="link_id" name="link_id" value="abc123" />"#;
        let unclosed = r#"<input type="hidden" name="link_id" id="link_id" value="abc123">"#;
        assert_eq!(extract_link_id(reordered), None);
        assert_eq!(extract_link_id(unclosed), None);
    }

    #[test]
    fn empty_value_is_captured_as_empty() {
        let page = r#"<input type="hidden" name="link_id" id="link_id" value="" />"#;
        let link_id = extract_link_id(page).unwrap();
        assert!(link_id.is_empty());
    }
}
