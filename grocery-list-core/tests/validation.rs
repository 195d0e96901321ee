use grocery_list_core::units::UnitCatalog;
use grocery_list_core::validate::{Problem, Validator};
use serde_json::{json, Value};

fn tacos() -> Value {
    json!({
        "name": "Tacos",
        "ingredients": [
            {"oil": {"amount": 2, "unit": "tbsp"}},
            {"tortilla": {"amount": 1, "unit": "single"}}
        ],
        "rating": 8,
        "spices": ["cumin", "chili powder"],
        "url": "https://example.com/tacos",
        "category": "mexican",
        "servings": "4"
    })
}

fn salsa() -> Value {
    json!({
        "name": "Salsa",
        "ingredients": [
            {"oil": {"amount": 6, "unit": "tsp"}},
            {"cilantro": {"amount": 1, "unit": "bunch"}}
        ],
        "rating": 7.5,
        "spices": ["salt", 5],
        "url": "https://example.com/salsa",
        "category": "mexican",
        "servings": 2
    })
}

fn document(recipes: Vec<Value>) -> Value {
    json!({ "recipes": recipes })
}

#[test]
fn clean_document_validates_into_typed_recipes() {
    let units = UnitCatalog::default();
    let book = Validator::new(&units)
        .validate(&document(vec![tacos(), salsa()]))
        .expect("valid recipes");

    assert_eq!(book.len(), 2);
    let tacos = book.find("TACOS").expect("case-insensitive lookup");
    assert_eq!(tacos.servings, 4.0);
    assert_eq!(tacos.ingredients.len(), 2);
    assert_eq!(tacos.ingredients[0].name, "oil");
    assert_eq!(tacos.ingredients[0].quantity.unit, "tbsp");
    let salsa = book.find("salsa").unwrap();
    assert!(salsa.spices.contains("5"));
    assert!(salsa.spices.contains("salt"));
}

#[test]
fn revalidating_is_idempotent() {
    let units = UnitCatalog::default();
    let validator = Validator::new(&units);
    let doc = document(vec![tacos(), salsa()]);
    let first = validator.check(&doc);
    let second = validator.check(&doc);
    assert!(first.report.is_clean());
    assert_eq!(first, second);
}

#[test]
fn missing_servings_is_reported_against_the_recipe() {
    let mut recipe = tacos();
    recipe.as_object_mut().unwrap().remove("servings");
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&document(vec![recipe]))
        .unwrap_err();

    let diag = err.report.recipe("Tacos").expect("diagnostic names the recipe");
    assert!(diag.problems.iter().any(|p| matches!(
        p,
        Problem::KeySet { missing, unexpected } if missing == &vec!["servings".to_string()] && unexpected.is_empty()
    )));
    assert!(err.to_string().contains("Recipe: Tacos"));
    assert!(err.to_string().contains("Missing: [servings]"));
}

#[test]
fn extra_notes_field_is_rejected() {
    let mut recipe = salsa();
    recipe
        .as_object_mut()
        .unwrap()
        .insert("notes".into(), json!("spicy"));
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&document(vec![tacos(), recipe]))
        .unwrap_err();

    assert_eq!(err.report.recipes.len(), 1);
    assert!(err.report.recipe("Tacos").is_none());
    let diag = err.report.recipe("Salsa").unwrap();
    assert!(matches!(
        &diag.problems[0],
        Problem::KeySet { unexpected, .. } if unexpected == &vec!["notes".to_string()]
    ));
}

#[test]
fn every_invalid_recipe_is_reported() {
    let mut first = tacos();
    first["rating"] = json!("great");
    let mut second = salsa();
    second["category"] = json!("Mexican");
    let units = UnitCatalog::default();
    let checked = Validator::new(&units).check(&document(vec![first, second]));

    assert_eq!(checked.report.recipes.len(), 2);
    assert!(checked.recipes.is_empty());
    assert!(matches!(
        &checked.report.recipe("Tacos").unwrap().problems[0],
        Problem::NotNumeric { field, .. } if field == "rating"
    ));
    assert!(matches!(
        &checked.report.recipe("Salsa").unwrap().problems[0],
        Problem::NotLowercase { field, value } if field == "category" && value == "Mexican"
    ));
}

#[test]
fn ingredient_problems_are_grouped_per_ingredient() {
    let mut recipe = tacos();
    recipe["ingredients"] = json!([
        {"Oil": {"amount": 2, "unit": "tbsp"}},
        {"tortilla": {"amount": "one", "unit": "dozen", "brand": "any"}},
        {"lime": {"amount": 1, "unit": "single"}}
    ]);
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&document(vec![recipe]))
        .unwrap_err();

    let diag = err.report.recipe("Tacos").unwrap();
    assert!(diag.problems.is_empty());
    assert_eq!(diag.ingredients.len(), 2);

    let oil = &diag.ingredients[0];
    assert_eq!(oil.ingredient, "Oil");
    assert_eq!(oil.problems.len(), 1);
    assert!(matches!(&oil.problems[0], Problem::Case(v) if v.word == "Oil"));

    let tortilla = &diag.ingredients[1];
    assert_eq!(tortilla.ingredient, "tortilla");
    assert!(tortilla.problems.contains(&Problem::InvalidKeyName("brand".into())));
    assert!(tortilla.problems.contains(&Problem::InvalidUnitName("dozen".into())));
    assert!(tortilla.problems.contains(&Problem::InvalidAmountType("string".into())));

    let rendered = err.report.to_string();
    assert_eq!(rendered.matches("Recipe: Tacos").count(), 1);
    assert_eq!(rendered.matches("Ingredient: tortilla").count(), 1);
    assert!(rendered.contains("Invalid key name: brand"));
}

#[test]
fn spices_must_be_numbers_or_lowercase() {
    let mut recipe = salsa();
    recipe["spices"] = json!(["Salt", 3, true]);
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&document(vec![recipe]))
        .unwrap_err();
    let diag = err.report.recipe("Salsa").unwrap();
    assert_eq!(
        diag.problems,
        vec![
            Problem::InvalidSpice("Salt".into()),
            Problem::InvalidSpice("true".into())
        ]
    );
}

#[test]
fn duplicate_names_ignoring_case_are_rejected() {
    let mut copy = tacos();
    copy["name"] = json!("TACOS");
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&document(vec![tacos(), copy]))
        .unwrap_err();
    let diag = err.report.recipe("TACOS").unwrap();
    assert_eq!(diag.problems, vec![Problem::DuplicateName("TACOS".into())]);
}

#[test]
fn document_without_recipes_list_is_rejected() {
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&json!({"dishes": []}))
        .unwrap_err();
    assert_eq!(err.report.document, vec![Problem::MissingRecipes]);
    assert_eq!(err.report.problem_count(), 1);
}

#[test]
fn recipe_without_usable_name_is_labelled_by_position() {
    let mut recipe = salsa();
    recipe["name"] = json!(42);
    let units = UnitCatalog::default();
    let err = Validator::new(&units)
        .validate(&document(vec![tacos(), recipe]))
        .unwrap_err();
    let diag = err.report.recipe("#2").expect("labelled by position");
    assert_eq!(diag.problems, vec![Problem::InvalidName]);
}

#[test]
fn units_outside_a_custom_catalog_fail() {
    let units = UnitCatalog {
        convertible: vec!["tbsp".into()],
        non_convertible: vec!["single".into()],
    };
    let err = Validator::new(&units)
        .validate(&document(vec![tacos(), salsa()]))
        .unwrap_err();
    assert!(err.report.recipe("Tacos").is_none());
    let salsa = err.report.recipe("Salsa").unwrap();
    let ingredients: Vec<&str> = salsa
        .ingredients
        .iter()
        .map(|i| i.ingredient.as_str())
        .collect();
    assert_eq!(ingredients, vec!["oil", "cilantro"]);
}
