//! One title-casing tool per style guide, all backed by the generic evaluator.

use crate::error::Result;
use crate::method::{Category, TransformMethod};
use crate::options::Options;
use crate::style_guide::{title_case, STYLE_GUIDES};

pub fn methods() -> Vec<TransformMethod> {
    STYLE_GUIDES
        .iter()
        .map(|rule| {
            TransformMethod::new(
                &format!("{}-style", rule.id),
                Category::StyleGuides,
                &format!("Title case following the {} style guide", rule.name),
                move |input: &str, _: &Options| -> Result<String> { Ok(title_case(rule, input)) },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tool_per_guide() {
        let methods = methods();
        assert_eq!(methods.len(), STYLE_GUIDES.len());
        assert!(methods.iter().any(|m| m.name() == "chicago-style"));
    }

    #[test]
    fn test_guides_disagree_where_rules_differ() {
        let methods = methods();
        let run = |name: &str| {
            methods
                .iter()
                .find(|m| m.name() == name)
                .unwrap()
                .run("a study from the field", &Options::new())
                .unwrap()
        };
        assert_eq!(run("ap-style"), "A Study From the Field");
        assert_eq!(run("chicago-style"), "A Study from the Field");
        assert_eq!(run("bluebook-style"), "A Study from the Field");
    }
}
