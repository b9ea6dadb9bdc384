use httparrot::widget::{load_templates, TEMPLATE_FILE_ATTR};
use httparrot::{AttrValue, Overrides, ParrotError, Parent, ResponseFactory, Widget};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize test logging
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("httparrot=trace"))
        .with_test_writer()
        .try_init();
}

fn user_factory() -> ResponseFactory {
    let mut factory = ResponseFactory::new();
    factory.define("user", |w, _| {
        w.set("name", "Ada").set("age", 36);
        Ok(())
    });
    factory
}

#[test]
fn ada_and_grace() {
    init_test_logging();
    let factory = user_factory();

    let ada = factory.build("user").unwrap();
    let grace = factory
        .build_with("user", &Overrides::new().set("name", "Grace"))
        .unwrap();

    assert!(ada.render().unwrap().contains("name=Ada"));
    assert!(grace.render().unwrap().contains("name=Grace"));
    assert_ne!(ada, grace);
}

#[test]
fn composition_discards_earlier_sets() {
    init_test_logging();
    let mut factory = user_factory();
    factory.define("admin", |w, f| {
        w.set("a", "child value");
        f.parent(w, "user")?;
        w.set("age", 99);
        Ok(())
    });
    factory.define("tagged_admin", |w, f| {
        f.parent(w, Parent::blueprint_with("admin", Overrides::new().set("a", "from parent")))?;
        w.declare_collection("tag");
        Ok(())
    });

    let admin = factory.build("admin").unwrap();
    assert!(admin.attr("a").is_nil());
    assert_eq!(admin.attr("age"), &AttrValue::Int(99));
    assert_eq!(admin.attr("name").as_str(), Some("Ada"));

    let tagged = factory.build("tagged_admin").unwrap();
    assert_eq!(tagged.attr("a").as_str(), Some("from parent"));
    assert_eq!(tagged.attr("tags"), &AttrValue::List(vec![]));
    assert_eq!(tagged.class(), Some("Widget::User"));
}

#[test]
fn clear_isolates_runs() {
    let mut factory = user_factory();
    assert!(factory.build("user").is_ok());
    factory.clear();
    match factory.build("user") {
        Err(err @ ParrotError::UnknownFactory { .. }) => {
            assert_eq!(
                err.to_string(),
                "Unknown factory type: user in known factories: []"
            );
        }
        other => panic!("Expected UnknownFactory, got {:?}", other),
    }
}

#[test]
fn renders_bundled_json_template() {
    init_test_logging();
    let factory = user_factory();
    let overrides = Overrides::new().set(TEMPLATE_FILE_ATTR, "user.json.erb");
    let widget = factory.build_with("user", &overrides).unwrap();

    let expected = "{\n  \"class\": \"Widget::User\",\n  \"name\": \"Ada\",\n  \"template\": \"user.json.erb\"\n}\n";
    assert_eq!(widget.render().unwrap(), expected);

    let with_email = factory
        .build_with("user", &overrides.clone().set("email", "ada@example.com"))
        .unwrap();
    assert!(with_email
        .render()
        .unwrap()
        .contains("  \"email\": \"ada@example.com\",\n"));
}

#[test]
fn renders_nested_collection_template() {
    let mut factory = ResponseFactory::new();
    factory.define("comment", |w, _| {
        w.set("body", "first");
        Ok(())
    });
    factory.define("thread", |w, f| {
        w.set(TEMPLATE_FILE_ATTR, "comments.html.erb");
        let comments = vec![
            f.build("comment")?,
            f.build_with("comment", &Overrides::new().set("body", "second"))?,
        ];
        w.set("comments", comments);
        Ok(())
    });

    let response = factory.build("thread").unwrap().to_wire_response(200).unwrap();
    let body = "<ul class=\"comments\">\n  <li>first</li>\n  <li>second</li>\n</ul>\n";
    assert_eq!(response.body, vec![body.to_string()]);
    assert_eq!(response.content_length(), Some(body.len()));
}

#[test]
fn wire_response_shape() {
    let factory = user_factory();
    let (status, headers, body) = factory
        .build("user")
        .unwrap()
        .to_wire_response(201)
        .unwrap()
        .into_parts();

    assert_eq!(status, 201);
    assert_eq!(headers.len(), 1);
    assert_eq!(body.len(), 1);
    assert_eq!(headers["Content-Length"], body[0].len().to_string());
}

#[test]
fn missing_bundled_template_fails_render() {
    let factory = user_factory();
    let widget = factory
        .build_with("user", &Overrides::new().set(TEMPLATE_FILE_ATTR, "nowhere.erb"))
        .unwrap();

    assert!(matches!(
        widget.to_wire_response(200),
        Err(ParrotError::TemplateNotFound { name, .. }) if name == "nowhere.erb"
    ));
}

#[test]
fn template_escaping_root_is_not_found() {
    let factory = user_factory();
    let widget = factory
        .build_with("user", &Overrides::new().set(TEMPLATE_FILE_ATTR, "../Cargo.toml"))
        .unwrap();
    assert!(matches!(
        widget.render(),
        Err(ParrotError::TemplateNotFound { .. })
    ));
}

#[test]
fn custom_templates_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hello.txt"), "hello <%= name %>").unwrap();
    let templates = load_templates(dir.path()).unwrap();

    let widget = user_factory()
        .build_with("user", &Overrides::new().set(TEMPLATE_FILE_ATTR, "hello.txt"))
        .unwrap();
    let response = widget.to_wire_response_with(200, &templates).unwrap();
    assert_eq!(response.body_text(), "hello Ada");
}

#[test]
fn one_of_picks_from_built_collection() {
    let factory = user_factory();
    let users = factory.collection_of("user", 3, &Overrides::new()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let picked: &Widget = ResponseFactory::one_of_with(&users, &mut rng).unwrap();
    assert_eq!(picked.class(), Some("Widget::User"));
}

proptest! {
    #[test]
    fn override_always_wins(name in "[a-zA-Z0-9 ]{0,20}", age in any::<i64>()) {
        let factory = user_factory();
        let overrides = Overrides::new().set("name", name.clone()).set("age", age);
        let widget = factory.build_with("user", &overrides).unwrap();
        prop_assert_eq!(widget.attr("name").as_str(), Some(name.as_str()));
        prop_assert_eq!(widget.attr("age").as_i64(), Some(age));
    }

    #[test]
    fn builds_never_alias(count in 0usize..8, mutated in "[a-z]{1,10}") {
        let factory = user_factory();
        let mut widgets = factory.collection_of("user", count, &Overrides::new()).unwrap();
        prop_assert_eq!(widgets.len(), count);

        if let Some(first) = widgets.first_mut() {
            first.set("name", mutated.clone()).set("extra", true);
        }
        for widget in widgets.iter().skip(1) {
            prop_assert_eq!(widget.attr("name").as_str(), Some("Ada"));
            prop_assert!(!widget.has("extra"));
        }
        let fresh = factory.build("user").unwrap();
        prop_assert_eq!(fresh.attr("name").as_str(), Some("Ada"));
    }
}
