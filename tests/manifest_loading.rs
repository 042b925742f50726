//! End-to-end: manifests on disk, resolved against a registry, composed by a
//! renderer over a non-string component type.

use std::fs;
use std::sync::Arc;

use provider_stack::{
    ComponentRegistry, ElementKey, Error, ManifestError, Props, Renderer, StackLoader,
};

/// Components of a toy host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Widget {
    Theme,
    Counter,
    Banner,
    Hint,
}

#[derive(Debug, Clone, PartialEq)]
enum Tree {
    Widget {
        widget: Widget,
        props: Props,
        key: Option<ElementKey>,
        child: Option<Box<Tree>>,
    },
    Group(Vec<Tree>),
    Content,
}

struct WidgetRenderer;

impl Renderer<Widget> for WidgetRenderer {
    type Node = Tree;

    fn element(&self, component: &Widget, props: &Props, key: Option<&ElementKey>, child: Option<Tree>) -> Tree {
        Tree::Widget {
            widget: *component,
            props: props.clone(),
            key: key.cloned(),
            child: child.map(Box::new),
        }
    }

    fn fragment(&self, children: Vec<Tree>) -> Tree {
        Tree::Group(children)
    }
}

fn registry() -> ComponentRegistry<Widget> {
    ComponentRegistry::new()
        .register("Theme", Widget::Theme)
        .register("Counter", Widget::Counter)
        .register("Banner", Widget::Banner)
        .register("Hint", Widget::Hint)
}

const APP_YAML: &str = r#"
name: app
description: Scenario stack
providers:
  - [Theme, { mode: dark }]
  - Counter
  - standalone: Banner
    props: { label: n }
  - standalone: Hint
    key: hint
"#;

#[test]
fn test_yaml_stack_resolves_and_composes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.yaml"), APP_YAML).unwrap();

    let loader = StackLoader::new().with_base_path(dir.path()).with_env_lookup(false);
    let stack = loader.load_stack("app", &registry()).unwrap();
    assert_eq!(stack.name(), Some("app"));
    assert_eq!(stack.len(), 4);

    let tree = stack.render(&WidgetRenderer, Some(Tree::Content));

    let mut dark = Props::new();
    dark.insert("mode".into(), "dark".into());
    let mut label = Props::new();
    label.insert("label".into(), "n".into());

    let expected = Tree::Widget {
        widget: Widget::Theme,
        props: dark,
        key: None,
        child: Some(Box::new(Tree::Widget {
            widget: Widget::Counter,
            props: Props::new(),
            key: None,
            child: Some(Box::new(Tree::Group(vec![
                Tree::Widget {
                    widget: Widget::Banner,
                    props: label,
                    key: Some(ElementKey::Index(2)),
                    child: None,
                },
                Tree::Group(vec![
                    Tree::Widget {
                        widget: Widget::Hint,
                        props: Props::new(),
                        key: Some(ElementKey::Named("hint".into())),
                        child: None,
                    },
                    Tree::Content,
                ]),
            ]))),
        })),
    };
    assert_eq!(tree, expected);
}

#[test]
fn test_json_and_yaml_forms_resolve_identically() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.json"),
        r#"{"providers": ["Theme", ["Counter"], ["Hint", {}], {"standalone": "Banner"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b.yml"),
        "providers:\n  - component: Theme\n  - Counter\n  - [Hint]\n  - standalone: Banner\n    props: {}\n",
    )
    .unwrap();

    let loader = StackLoader::new().with_base_path(dir.path()).with_env_lookup(false);
    let a = loader.load_stack("a", &registry()).unwrap();
    let b = loader.load_stack("b", &registry()).unwrap();

    assert_eq!(a.providers(), b.providers());
    assert_eq!(
        a.render(&WidgetRenderer, Some(Tree::Content)),
        b.render(&WidgetRenderer, Some(Tree::Content))
    );
}

#[test]
fn test_unknown_component_fails_resolution() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.yaml"), "providers: [Theme, Router]").unwrap();

    let loader = StackLoader::new().with_base_path(dir.path()).with_env_lookup(false);
    let err = loader.load_stack("app", &registry()).unwrap_err();

    match err {
        Error::Validation { message, context } => {
            assert!(message.contains("Unknown component 'Router'"));
            assert!(message.contains("Registered components: Banner, Counter, Hint, Theme"));
            assert_eq!(context.field_path.as_deref(), Some("providers[1]"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_malformed_entry_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.yaml"), "providers:\n  - Theme\n  - 12\n  - Counter\n").unwrap();

    let loader = StackLoader::new().with_base_path(dir.path()).with_env_lookup(false);
    let err = loader.load_stack("app", &registry()).unwrap_err();

    match err {
        Error::Manifest(ManifestError::MalformedDescriptor { index, reason, hint }) => {
            assert_eq!(index, 1);
            assert!(reason.contains("found a number"));
            assert!(hint.is_some());
        }
        other => panic!("expected malformed descriptor, got {other:?}"),
    }
}

#[test]
fn test_loader_is_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.yaml"), APP_YAML).unwrap();

    let loader = Arc::new(StackLoader::new().with_base_path(dir.path()).with_env_lookup(false));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let loader = Arc::clone(&loader);
            std::thread::spawn(move || loader.load("app").map(|m| m.providers.len()))
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap().unwrap(), 4);
    }
    assert_eq!(loader.cached_len(), 1);
}
