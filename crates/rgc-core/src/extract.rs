//! Pattern-based component extraction.
//!
//! Detection is regex-driven and builds no AST, so commented-out code and
//! generic type arguments that look like tags still match. Everything the
//! graph and classifier need from source text goes through
//! [`ComponentExtractor`], so a real parser can replace [`PatternExtractor`]
//! without touching them.

use crate::error::{Error, Result};
use crate::types::{ComponentCandidate, DetectionRule};
use regex::Regex;
use std::collections::HashSet;

/// `export [default] function|class|const Name` at the start of a line.
const EXPORTED_DECLARATION: &str =
    r"(?m)^export\s+(?:default\s+)?(?:function|class|const)\s+(\w+)";

/// `export const Name = (` or `export const Name = arg =>`, anywhere.
const EXPORTED_ARROW: &str = r"export\s+const\s+(\w+)\s*=\s*(?:\(|\w+\s*=>)";

/// `function Name` at the start of a line.
const TOP_LEVEL_FUNCTION: &str = r"(?m)^function\s+(\w+)";

/// Keywords the declaration patterns can capture in place of a name, as in
/// `export default class extends Base` or `export default async function`.
const RESERVED: &[&str] = &[
    "async", "await", "class", "const", "default", "enum", "extends", "function", "implements",
    "interface", "let", "new", "static", "type", "var",
];

/// A capitalized JSX tag: `<Name` followed by whitespace, `/` or `>`.
const COMPONENT_TAG: &str = r"<([A-Z]\w*)[\s/>]";

/// Narrow interface between source text and the component graph.
pub trait ComponentExtractor: Send + Sync {
    /// Definition candidates declared in `text`, deduplicated by name.
    ///
    /// Never fails: text that matches nothing yields an empty list.
    fn definitions(&self, path: &str, text: &str) -> Vec<ComponentCandidate>;

    /// Names referenced from `text`, deduplicated, in order of first
    /// occurrence. Callers filter against the registry.
    fn references(&self, text: &str) -> Vec<String>;
}

/// Regex implementation of [`ComponentExtractor`].
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    exported_declaration: Regex,
    exported_arrow: Regex,
    top_level_function: Regex,
    component_tag: Regex,
    components_only: bool,
}

impl PatternExtractor {
    /// Compile the detection patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            exported_declaration: compile(EXPORTED_DECLARATION)?,
            exported_arrow: compile(EXPORTED_ARROW)?,
            top_level_function: compile(TOP_LEVEL_FUNCTION)?,
            component_tag: compile(COMPONENT_TAG)?,
            components_only: false,
        })
    }

    /// Only report definitions whose name starts with an uppercase letter.
    ///
    /// JSX treats lowercase tags as intrinsic elements, so such definitions
    /// can never be referenced by the tag scan.
    pub fn components_only(mut self, enabled: bool) -> Self {
        self.components_only = enabled;
        self
    }

    fn accepts(&self, name: &str) -> bool {
        if RESERVED.contains(&name) {
            return false;
        }
        !self.components_only || name.chars().next().is_some_and(char::is_uppercase)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Pattern(e.to_string()))
}

impl ComponentExtractor for PatternExtractor {
    fn definitions(&self, _path: &str, text: &str) -> Vec<ComponentCandidate> {
        let rules = [
            (&self.exported_declaration, DetectionRule::ExportedDeclaration),
            (&self.exported_arrow, DetectionRule::ExportedArrow),
            (&self.top_level_function, DetectionRule::TopLevelFunction),
        ];

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for (regex, rule) in rules {
            for captures in regex.captures_iter(text) {
                let Some(name) = captures.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if self.accepts(name) && seen.insert(name.to_string()) {
                    candidates.push(ComponentCandidate {
                        name: name.to_string(),
                        rule,
                    });
                }
            }
        }
        candidates
    }

    fn references(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.component_tag
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str())
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(candidates: &[ComponentCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_exported_declarations() {
        let extractor = PatternExtractor::new().unwrap();
        let text = "\
export function Header() {}
export default class Layout extends React.Component {}
export const Footer = () => null;
export default function App() {}
";
        let found = extractor.definitions("src/App.tsx", text);

        assert_eq!(names(&found), vec!["Header", "Layout", "Footer", "App"]);
        assert!(found
            .iter()
            .all(|c| c.rule == DetectionRule::ExportedDeclaration));
    }

    #[test]
    fn test_anonymous_default_class_is_not_named_after_keyword() {
        let extractor = PatternExtractor::new().unwrap();
        let text = "\
export default class extends React.Component {}
export const enum Size { Small }
";
        let found = extractor.definitions("src/Page.jsx", text);

        assert!(names(&found).is_empty());
    }

    #[test]
    fn test_indented_arrow_export() {
        let extractor = PatternExtractor::new().unwrap();
        let text = "  export const Badge = props => <span>{props.label}</span>;\n";
        let found = extractor.definitions("Badge.jsx", text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Badge");
        assert_eq!(found[0].rule, DetectionRule::ExportedArrow);
    }

    #[test]
    fn test_fallback_function_only_when_unknown() {
        let extractor = PatternExtractor::new().unwrap();
        let text = "\
function Helper() {}
export function Card() {}
function Card() {}
";
        let found = extractor.definitions("Card.tsx", text);

        assert_eq!(names(&found), vec!["Card", "Helper"]);
        assert_eq!(found[0].rule, DetectionRule::ExportedDeclaration);
        assert_eq!(found[1].rule, DetectionRule::TopLevelFunction);
    }

    #[test]
    fn test_nested_function_is_not_top_level() {
        let extractor = PatternExtractor::new().unwrap();
        let found = extractor.definitions("a.ts", "  function inner() {}\n");
        assert!(found.is_empty());
    }

    #[test]
    fn test_malformed_text_yields_nothing() {
        let extractor = PatternExtractor::new().unwrap();
        assert!(extractor.definitions("x.ts", "export {{{ <<<").is_empty());
        assert!(extractor.definitions("x.ts", "").is_empty());
    }

    #[test]
    fn test_components_only() {
        let extractor = PatternExtractor::new().unwrap().components_only(true);
        let text = "export function useThing() {}\nexport function Thing() {}\n";
        let found = extractor.definitions("thing.ts", text);
        assert_eq!(names(&found), vec!["Thing"]);
    }

    #[test]
    fn test_references_dedup_in_order() {
        let extractor = PatternExtractor::new().unwrap();
        let text = r#"
return (
  <Layout title="x">
    <Card/>
    <Card />
    <div><Button>ok</Button></div>
  </Layout>
);
"#;
        assert_eq!(
            extractor.references(text),
            vec!["Layout", "Card", "Button"]
        );
    }

    #[test]
    fn test_references_require_terminator() {
        let extractor = PatternExtractor::new().unwrap();
        // Member expressions and lowercase tags are not component references.
        let text = "<Foo.Bar /> <div> <B/>";
        assert_eq!(extractor.references(text), vec!["B"]);
    }
}
