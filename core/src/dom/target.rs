use serde::{Deserialize, Serialize};

use super::{Document, ElementId};

/// What a tour step points at.
///
/// Resolved fresh on every computation since elements may come and go
/// between layout passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    /// Every element matching a selector
    Selector(String),
    /// A direct element reference
    Element(ElementId),
    /// Ordered mix of the above
    List(Vec<Target>),
}

impl Target {
    pub fn selector(selector: impl Into<String>) -> Self {
        Target::Selector(selector.into())
    }

    /// Resolve to concrete elements in target order.
    ///
    /// Selectors matching nothing and detached element references simply
    /// contribute nothing.
    pub fn resolve<D: Document + ?Sized>(&self, doc: &D) -> Vec<ElementId> {
        let mut elements = Vec::new();
        self.resolve_into(doc, &mut elements);
        elements
    }

    fn resolve_into<D: Document + ?Sized>(&self, doc: &D, out: &mut Vec<ElementId>) {
        match self {
            Target::Selector(selector) => out.extend(doc.query_selector_all(selector)),
            Target::Element(id) => {
                if doc.is_connected(*id) {
                    out.push(*id);
                }
            }
            Target::List(targets) => {
                for target in targets {
                    target.resolve_into(doc, out);
                }
            }
        }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}

impl<T: Into<Target>> From<Vec<T>> for Target {
    fn from(targets: Vec<T>) -> Self {
        Target::List(targets.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementNode, Rect, StaticDocument};

    fn doc() -> StaticDocument {
        StaticDocument::new()
            .with_element(ElementNode::new(1, Rect::default()).with_selector(".a"))
            .with_element(ElementNode::new(2, Rect::default()).with_selector(".b"))
            .with_element(ElementNode::new(3, Rect::default()).with_selector(".a"))
    }

    #[test]
    fn test_selector_resolves_all_matches() {
        assert_eq!(
            Target::selector(".a").resolve(&doc()),
            vec![ElementId(1), ElementId(3)]
        );
        assert!(Target::selector(".missing").resolve(&doc()).is_empty());
    }

    #[test]
    fn test_list_preserves_order() {
        let target = Target::List(vec![
            Target::selector(".b"),
            Target::Element(ElementId(1)),
            Target::selector(".nothing"),
            Target::Element(ElementId(42)),
        ]);
        assert_eq!(target.resolve(&doc()), vec![ElementId(2), ElementId(1)]);
    }

    #[test]
    fn test_nested_and_empty_lists() {
        assert!(Target::List(Vec::new()).resolve(&doc()).is_empty());
        let nested = Target::List(vec![Target::List(vec![Target::selector(".b")])]);
        assert_eq!(nested.resolve(&doc()), vec![ElementId(2)]);
    }

    #[test]
    fn test_untagged_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            target: Target,
        }
        let w: Wrapper = toml::from_str(r#"target = [".a", 2, [".b"]]"#).unwrap();
        assert_eq!(
            w.target,
            Target::List(vec![
                Target::selector(".a"),
                Target::Element(ElementId(2)),
                Target::List(vec![Target::selector(".b")]),
            ])
        );
    }
}
