use pulldown_cmark::{Options, Parser, html};

use crate::error::LoadResult;

/// Turns markdown into markup. Horizontal rules must come out as
/// [`crate::constants::SPLIT_TOKEN`] so the loader can cut slides apart.
pub trait Converter {
    fn to_markup(&self, markdown: &str) -> LoadResult<String>;
}

/// CommonMark converter backed by pulldown-cmark.
#[derive(Debug, Clone, Copy)]
pub struct CmarkConverter {
    options: Options,
}

impl Default for CmarkConverter {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl Converter for CmarkConverter {
    fn to_markup(&self, markdown: &str) -> LoadResult<String> {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPLIT_TOKEN;

    #[test]
    fn rule_renders_as_split_token() {
        let html = CmarkConverter::default().to_markup("# A\n\n---\n\nB").unwrap();
        assert_eq!(html.matches(SPLIT_TOKEN).count(), 1);
        assert!(html.starts_with("<h1>A</h1>"));
        assert!(html.contains("<p>B</p>"));
    }

    #[test]
    fn setext_underline_is_not_a_rule() {
        // A dash line right under text is a level-2 heading
        let html = CmarkConverter::default().to_markup("Title\n---\n").unwrap();
        assert!(!html.contains(SPLIT_TOKEN));
        assert!(html.contains("<h2>Title</h2>"));
    }
}
