mod common;

use pretty_assertions::assert_eq;
use recordkit_schema::{
    ComposeOptions, Composer, Constructor, Diagnostic, Error, Fields, ImmutableRecords, Primitive,
    Property, PropertyCollection, RecordBackend, RecordConstructor, RecordFactory, Type, Value,
    compose,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn with_x(name: &str, default: i32) -> RecordFactory {
    compose(
        ComposeOptions::new(name)
            .property("x", Property::new(Type::number()).with_default(default)),
    )
    .unwrap()
    .into_factory()
}

fn with_y(name: &str, default: &str) -> RecordFactory {
    compose(
        ComposeOptions::new(name)
            .property("y", Property::new(Type::string()).with_default(default)),
    )
    .unwrap()
    .into_factory()
}

// ── Defaults snapshot ────────────────────────────────────────────

#[test]
fn defaults_are_instantiated_through_declared_type() {
    let factory = compose(
        ComposeOptions::new("Settings")
            .property("title", Property::new(Type::string()).with_default(42))
            .property("volume", Property::new(Type::number()).with_default("11"))
            .property("muted", Property::new(Type::boolean()))
            .property("tags", Property::new(Type::list())),
    )
    .unwrap()
    .into_factory();

    assert_eq!(
        Value::Mapping(factory.defaults().clone()).to_json(),
        json!({"title": "42", "volume": 11, "muted": false, "tags": []})
    );
}

#[test]
fn defaults_skip_item_typing() {
    let factory = compose(
        ComposeOptions::new("Bag").property(
            "items",
            Property::new(Type::list())
                .with_items(recordkit_schema::TypeDescriptor::new(Type::number()))
                .with_default(json!(["1", "2"])),
        ),
    )
    .unwrap()
    .into_factory();

    assert_eq!(factory.defaults()["items"], Value::from(json!(["1", "2"])));
}

#[test]
fn rejected_default_fails_composition() {
    let result = compose(
        ComposeOptions::new("Broken")
            .property("n", Property::new(Type::number()).with_default("many")),
    );
    assert!(matches!(result, Err(Error::Coercion { .. })));
}

#[test]
fn empty_schema_composes() {
    let composition = compose(ComposeOptions::new("Unit")).unwrap();
    assert!(composition.diagnostics.is_empty());
    assert!(composition.factory.describe().is_empty());
    assert!(composition.factory.create(None).unwrap().is_empty());
}

// ── Inheritance ──────────────────────────────────────────────────

#[test]
fn extended_schema_contributes_properties() {
    let base = with_x("Base", 1);
    let child = compose(
        ComposeOptions::new("Child")
            .extend(&base)
            .property("z", Property::new(Type::boolean())),
    )
    .unwrap()
    .into_factory();

    assert_eq!(child.describe().names().collect::<Vec<_>>(), vec!["x", "z"]);
    assert_eq!(child.describe().get("x"), base.describe().get("x"));
}

#[test]
fn extends_override_own_properties() {
    let a = with_x("A", 1);
    let b = compose(
        ComposeOptions::new("B")
            .extends([&a])
            .property("x", Property::new(Type::number()).with_default(2)),
    )
    .unwrap()
    .into_factory();

    assert_eq!(b.defaults()["x"], Value::from(1));
    assert_eq!(b.describe().get("x"), a.describe().get("x"));
    assert_eq!(b.create(None).unwrap().get("x"), Some(&Value::from(1)));
}

#[test]
fn last_extend_wins() {
    let a = with_y("A", "from-a");
    let b = with_y("B", "from-b");
    let c = compose(ComposeOptions::new("C").extends([&a, &b]))
        .unwrap()
        .into_factory();

    assert_eq!(c.describe().get("y"), b.describe().get("y"));
    assert_eq!(c.defaults()["y"], Value::from("from-b"));

    let reversed = compose(ComposeOptions::new("D").extends([&b, &a]))
        .unwrap()
        .into_factory();
    assert_eq!(reversed.defaults()["y"], Value::from("from-a"));
}

#[test]
fn extending_does_not_touch_parent_schema() {
    let a = with_x("A", 1);
    let before = a.describe().clone();
    let _child = compose(
        ComposeOptions::new("Child")
            .extend(&a)
            .property("extra", Property::new(Type::string())),
    )
    .unwrap();
    assert_eq!(a.describe(), &before);
    assert!(!a.describe().contains("extra"));
}

#[test]
fn multi_level_inheritance() {
    let a = with_x("A", 1);
    let b = compose(
        ComposeOptions::new("B")
            .extend(&a)
            .property("y", Property::new(Type::string())),
    )
    .unwrap()
    .into_factory();
    let c = compose(ComposeOptions::new("C").extend(&b)).unwrap().into_factory();

    assert_eq!(c.describe().len(), 2);
    assert_eq!(c.create(None).unwrap().to_json(), json!({"x": 1, "y": ""}));
}

// ── Diagnostics ──────────────────────────────────────────────────

#[test]
fn primitive_extend_is_skipped_with_diagnostic() {
    common::init_tracing();
    let plain = with_x("Plain", 3);
    let composition = compose(
        ComposeOptions::new("Odd")
            .property("x", Property::new(Type::number()).with_default(3))
            .extend(Type::string()),
    )
    .unwrap();

    assert_eq!(
        composition.diagnostics,
        vec![Diagnostic::PrimitiveCannotExtend {
            schema: "Odd".into(),
            type_name: "String".into(),
        }]
    );
    assert_eq!(composition.factory.describe(), plain.describe());
}

#[test]
fn non_composed_extend_is_skipped_with_diagnostic() {
    common::init_tracing();
    let composition = compose(ComposeOptions::new("Odd").extend(Type::list())).unwrap();

    assert_eq!(composition.diagnostics.len(), 1);
    let diagnostic = &composition.diagnostics[0];
    assert!(matches!(diagnostic, Diagnostic::NonComposedCannotExtend { .. }));
    assert_eq!(diagnostic.schema(), "Odd");
    assert_eq!(diagnostic.type_name(), "List");
    assert!(composition.factory.describe().is_empty());
}

#[test]
fn one_diagnostic_per_skipped_entry() {
    common::init_tracing();
    let a = with_x("A", 1);
    let composition = compose(ComposeOptions::new("Mixed").extends([
        Type::number(),
        Type::from(&a),
        Type::from(Constructor::map()),
        Type::boolean(),
    ]))
    .unwrap();

    let names: Vec<_> = composition
        .diagnostics
        .iter()
        .map(Diagnostic::type_name)
        .collect();
    assert_eq!(names, vec!["Number", "Map", "Boolean"]);
    assert_eq!(composition.factory.describe(), a.describe());
}

#[test]
fn diagnostic_messages() {
    let primitive = Diagnostic::PrimitiveCannotExtend {
        schema: "S".into(),
        type_name: "Number".into(),
    };
    assert_eq!(
        primitive.to_string(),
        "S: primitive type `Number` cannot extend a record type"
    );
    let other = Diagnostic::NonComposedCannotExtend {
        schema: "S".into(),
        type_name: "List".into(),
    };
    assert!(other.to_string().contains("only composed records can be extended"));
}

#[test]
fn user_primitive_cannot_extend() {
    fn id(value: Option<&Value>) -> recordkit_schema::Result<Value> {
        Ok(value.cloned().unwrap_or_default())
    }
    let composition =
        compose(ComposeOptions::new("S").extend(Primitive::new("Id", id))).unwrap();
    assert!(matches!(
        composition.diagnostics.as_slice(),
        [Diagnostic::PrimitiveCannotExtend { type_name, .. }] if type_name == "Id"
    ));
}

// ── Options ──────────────────────────────────────────────────────

#[test]
fn properties_collection_is_taken_as_is() {
    let mut props = PropertyCollection::new();
    props.insert("a".into(), Property::new(Type::string()));
    props.insert("b".into(), Property::new(Type::number()));
    let factory = compose(ComposeOptions::new("P").properties(props))
        .unwrap()
        .into_factory();
    assert_eq!(factory.describe().names().collect::<Vec<_>>(), vec!["a", "b"]);
}

// ── Backend injection ────────────────────────────────────────────

#[derive(Default)]
struct RecordingBackend {
    defined: Arc<Mutex<Vec<(String, Fields)>>>,
    constructed: Arc<AtomicUsize>,
}

struct CountingConstructor {
    inner: Arc<dyn RecordConstructor>,
    constructed: Arc<AtomicUsize>,
}

impl RecordBackend for RecordingBackend {
    fn define(&self, name: &str, defaults: Fields) -> Arc<dyn RecordConstructor> {
        self.defined
            .lock()
            .unwrap()
            .push((name.to_string(), defaults.clone()));
        Arc::new(CountingConstructor {
            inner: ImmutableRecords.define(name, defaults),
            constructed: Arc::clone(&self.constructed),
        })
    }
}

impl RecordConstructor for CountingConstructor {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn defaults(&self) -> &Fields {
        self.inner.defaults()
    }

    fn construct(&self, values: Fields) -> recordkit_schema::Record {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        self.inner.construct(values)
    }
}

#[test]
fn composer_uses_injected_backend() {
    let backend = RecordingBackend::default();
    let defined = Arc::clone(&backend.defined);
    let constructed = Arc::clone(&backend.constructed);
    let composer = Composer::with_backend(backend);

    let factory = composer
        .compose(
            ComposeOptions::new("Counter")
                .property("n", Property::new(Type::number()).with_default(2)),
        )
        .unwrap()
        .into_factory();

    {
        let defined = defined.lock().unwrap();
        assert_eq!(defined.len(), 1);
        assert_eq!(defined[0].0, "Counter");
        assert_eq!(defined[0].1["n"], Value::from(2));
    }

    factory.create(None).unwrap();
    factory.create_from_json(json!({"n": 4})).unwrap();
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}
