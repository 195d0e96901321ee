use std::fs::write;

use grocery_list_core::contract::MockRecipeSource;
use grocery_list_core::source::{InMemorySource, JsonFileSource};
use grocery_list_core::{
    AggregateError, BucketKind, ConfigError, CoreConfig, InputError, LoadError, SelectionError,
    Session, SessionError,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn recipes() -> Value {
    json!({
        "recipes": [
            {
                "name": "Tacos",
                "ingredients": [
                    {"oil": {"amount": 2, "unit": "tbsp"}},
                    {"tortilla": {"amount": 1, "unit": "single"}}
                ],
                "rating": 8,
                "spices": ["cumin", "salt"],
                "url": "https://example.com/tacos",
                "category": "mexican",
                "servings": 4
            },
            {
                "name": "Salsa",
                "ingredients": [
                    {"oil": {"amount": 6, "unit": "tsp"}},
                    {"cilantro": {"amount": 1, "unit": "bunch"}}
                ],
                "rating": 6,
                "spices": ["salt"],
                "url": "https://example.com/salsa",
                "category": "mexican",
                "servings": 2
            },
            {
                "name": "Pesto",
                "ingredients": [
                    {"basil": {"amount": 2, "unit": "bunch"}},
                    {"garlic": {"amount": 2, "unit": "clove"}},
                    {"cilantro": {"amount": 3, "unit": "clove"}},
                    {"oil": {"amount": 1, "unit": "lbs"}}
                ],
                "rating": 9,
                "spices": [],
                "url": "https://example.com/pesto",
                "category": "italian",
                "servings": 4
            }
        ]
    })
}

fn open() -> Session {
    Session::open(&InMemorySource::new(recipes()), CoreConfig::default()).expect("valid recipes")
}

#[test]
fn tacos_and_salsa_end_to_end() {
    let mut session = open();
    let outcome = session.select("tacos, Salsa");
    assert_eq!(outcome.added, vec!["tacos", "salsa"]);
    assert!(outcome.unknown.is_empty());

    session.prepare().expect("prepare succeeds");
    let list = session.shopping_list();

    assert_eq!(list.keys(), vec!["cilantro", "oil", "tortilla"]);
    let oil = &list.get("oil").unwrap().ingredient;
    assert_eq!(oil.unit, "tbsp");
    assert!((oil.amount - 4.0).abs() < 0.01, "oil was {}", oil.amount);
    assert_eq!(list.get("tortilla").unwrap().ingredient.amount, 1.0);
    assert_eq!(list.get("cilantro").unwrap().ingredient.unit, "bunch");
    assert_eq!(
        list.spices().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["cumin", "salt"]
    );
}

#[test]
fn preparing_twice_does_not_double_amounts() {
    let mut session = open();
    session.select("tacos");
    session.prepare().unwrap();
    let first = session.shopping_list();
    session.prepare().unwrap();
    assert_eq!(session.shopping_list(), first);
}

#[test]
fn deselecting_takes_effect_on_next_prepare() {
    let mut session = open();
    session.select("tacos,salsa");
    session.prepare().unwrap();
    session.deselect("SALSA").unwrap();
    session.prepare().unwrap();

    let list = session.shopping_list();
    assert!(list.get("cilantro").is_none());
    assert_eq!(list.get("oil").unwrap().ingredient.amount, 2.0);
    assert_eq!(
        session.deselect("pesto"),
        Err(SelectionError::NotSelected("pesto".into()))
    );
}

#[test]
fn failed_prepare_keeps_previous_totals() {
    let mut session = open();
    session.select("salsa");
    session.prepare().unwrap();
    let before = session.shopping_list();

    // cilantro by the bunch in salsa, by the clove in pesto
    session.select("pesto");
    let err = session.prepare().unwrap_err();
    assert!(matches!(
        err,
        AggregateError::UnresolvableUnitConflict { ref ingredient, .. } if ingredient == "cilantro"
    ));
    assert_eq!(session.shopping_list(), before);
}

#[test]
fn manual_item_is_checked_against_the_selection() {
    let mut session = open();
    session.select("pesto");

    // pesto stores oil in lbs; the table has no cup/liquid -> lbs factor
    let err = session.add_item("oil", "1 cup/liquid").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Aggregate(AggregateError::Conversion { ref ingredient, .. }) if ingredient == "oil"
    ));
    assert!(session.manual_items().is_empty());
    session.prepare().unwrap();
    assert_eq!(
        session.buckets().get(BucketKind::Convertible, "oil").unwrap().unit,
        "lbs"
    );
}

#[test]
fn conflicting_manual_item_can_be_removed_without_clearing() {
    let mut session = open();
    session.add_item("oil", "1 cup/liquid").unwrap();
    session.select("pesto");

    let err = session.prepare().unwrap_err();
    assert!(matches!(err, AggregateError::Conversion { ref ingredient, .. } if ingredient == "oil"));
    assert_eq!(
        session.buckets().get(BucketKind::Convertible, "oil").unwrap().unit,
        "cup/liquid"
    );

    session.remove_item("Oil").unwrap();
    session.prepare().unwrap();
    assert!(session.manual_items().is_empty());
    assert!(session.selection().contains("pesto"));
    assert_eq!(session.shopping_list().get("oil").unwrap().ingredient.unit, "lbs");

    assert_eq!(
        session.remove_item("oil"),
        Err(InputError::UnknownItem {
            ingredient: "oil".into()
        })
    );
}

#[test]
fn add_item_folds_in_selected_recipes() {
    let mut session = open();
    session.select("salsa");
    session.add_item("milk", "1 cup/liquid").unwrap();

    let list = session.shopping_list();
    assert_eq!(list.get("cilantro").unwrap().ingredient.amount, 1.0);
    assert_eq!(list.get("milk").unwrap().ingredient.amount, 1.0);
    assert!(list.spices().contains("salt"));
}

#[test]
fn manual_items_join_the_list_and_survive_prepare() {
    let mut session = open();
    session.add_item("Milk", "1 cup/liquid").unwrap();
    session.add_item("cilantro", "2 bunch").unwrap();
    session.select("salsa");
    session.prepare().unwrap();

    let list = session.shopping_list();
    assert_eq!(list.get("milk").unwrap().ingredient.unit, "cup/liquid");
    assert_eq!(list.get("cilantro").unwrap().ingredient.amount, 3.0);
    assert_eq!(session.manual_items().len(), 2);
}

#[test]
fn rejected_manual_items_leave_totals_untouched() {
    let mut session = open();
    session.select("salsa");
    session.prepare().unwrap();
    let before = session.buckets().clone();

    let err = session.add_item("cilantro", "three bunch").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Input(InputError::InvalidAmount { ref amount, .. }) if amount == "three"
    ));
    let err = session.add_item("cilantro", "3 handful").unwrap_err();
    assert!(matches!(err, SessionError::Input(InputError::UnknownUnit { .. })));
    let err = session.add_item("cilantro", "3").unwrap_err();
    assert!(matches!(err, SessionError::Input(InputError::MissingUnit { .. })));
    let err = session.add_item("cilantro", "3 clove").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Aggregate(AggregateError::UnresolvableUnitConflict { .. })
    ));

    assert_eq!(session.buckets(), &before);
    assert!(session.manual_items().is_empty());
}

#[test]
fn butter_in_both_buckets_is_disambiguated() {
    let mut session = open();
    session.add_item("butter", "1 oz/solid").unwrap();
    session.add_item("butter", "1 single").unwrap();
    let list = session.shopping_list();
    assert_eq!(list.get("butter").unwrap().bucket, BucketKind::Convertible);
    assert_eq!(list.get("butter_").unwrap().bucket, BucketKind::NonConvertible);
}

#[test]
fn clear_resets_everything_but_the_recipes() {
    let mut session = open();
    session.select("tacos");
    session.add_item("milk", "1 cup/liquid").unwrap();
    session.prepare().unwrap();

    session.clear();
    assert!(session.selection().is_empty());
    assert!(session.buckets().is_empty());
    assert!(session.spices().is_empty());
    assert!(session.shopping_list().is_empty());
    assert_eq!(session.recipes().len(), 3);
}

#[test]
fn unknown_recipes_are_reported_not_selected() {
    let mut session = open();
    let outcome = session.select("tacos, lasagna");
    assert_eq!(outcome.added, vec!["tacos"]);
    assert_eq!(outcome.unknown, vec!["lasagna"]);
    assert!(matches!(
        session.recipe("lasagna"),
        Err(SelectionError::UnknownRecipe(_))
    ));
    assert_eq!(session.recipe("PESTO").unwrap().category, "italian");
}

#[test]
fn filters_by_rating_and_category() {
    let session = open();
    let good: Vec<&str> = session
        .recipes()
        .with_min_rating(8.0)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(good, vec!["Tacos", "Pesto"]);
    let mexican = session.recipes().in_category("Mexican");
    assert_eq!(mexican.len(), 2);
    let both: Vec<&str> = session
        .recipes()
        .matching(Some(7.0), Some(" MEXICAN "))
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(both, vec!["Tacos"]);
    assert_eq!(session.recipes().matching(None, None).len(), 3);
}

#[test]
fn invalid_document_blocks_the_session() {
    let mut doc = recipes();
    doc["recipes"][1]["notes"] = json!("extra");
    let err = Session::open(&InMemorySource::new(doc), CoreConfig::default()).unwrap_err();
    match err {
        SessionError::Validation(e) => assert!(e.report.recipe("Salsa").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn source_is_loaded_once_through_the_trait() {
    let mut source = MockRecipeSource::new();
    source.expect_load().times(1).returning(|| Ok(recipes()));
    source
        .expect_describe()
        .return_const("mock recipes".to_string());

    let session = Session::open(&source, CoreConfig::default()).unwrap();
    assert_eq!(session.recipes().len(), 3);
}

#[test]
fn load_failures_surface_as_load_errors() {
    let mut source = MockRecipeSource::new();
    source.expect_load().returning(|| {
        Err(LoadError::Json(
            serde_json::from_str::<Value>("{").unwrap_err(),
        ))
    });
    source.expect_describe().return_const("broken".to_string());

    let err = Session::open(&source, CoreConfig::default()).unwrap_err();
    assert!(matches!(err, SessionError::Load(LoadError::Json(_))));
}

#[test]
fn bad_config_is_rejected_before_loading() {
    let mut source = MockRecipeSource::new();
    source.expect_load().never();
    source.expect_describe().never();
    let config = CoreConfig {
        disambiguation_marker: String::new(),
        ..CoreConfig::default()
    };
    let err = Session::open(&source, config).unwrap_err();
    assert!(matches!(err, SessionError::Config(ConfigError::EmptyMarker)));
}

#[test]
fn json_file_source_reads_from_disk() {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), recipes().to_string()).unwrap();
    let session = Session::open(&JsonFileSource::new(file.path()), CoreConfig::default()).unwrap();
    assert!(session.recipes().find("salsa").is_some());

    let missing = JsonFileSource::new("/definitely/not/here/recipes.json");
    let err = Session::open(&missing, CoreConfig::default()).unwrap_err();
    assert!(matches!(err, SessionError::Load(LoadError::Io { .. })));
}
