//! Tests for collections, maps and nested object paths.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use kova::{
    CollectionExt, ComparableExt, Messages, Schema, StringExt, ValidationConfig, ValidatorExt,
};

#[derive(Debug, Clone)]
struct Address {
    city: String,
}

#[derive(Debug, Clone)]
struct User {
    name: String,
    address: Address,
}

#[derive(Debug, Clone)]
struct Group {
    users: Vec<User>,
}

fn failure<T: std::fmt::Debug>(result: kova::Outcome<T>) -> Messages {
    result.unwrap().into_result().unwrap_err()
}

fn group_schema() -> kova::ObjectSchema<Group> {
    let address = Schema::object::<Address>("Address").field(
        "city",
        |a: &Address| &a.city,
        Schema::string().not_blank(),
    );
    let user = Schema::object::<User>("User")
        .field("name", |u: &User| &u.name, Schema::string().min_len(1))
        .field("address", |u: &User| &u.address, address);

    Schema::object::<Group>("Group").field(
        "users",
        |g: &Group| &g.users,
        Schema::list::<User>().non_empty().on_each(user),
    )
}

fn user(name: &str, city: &str) -> User {
    User {
        name: name.to_string(),
        address: Address {
            city: city.to_string(),
        },
    }
}

#[test]
fn test_nested_element_path() {
    let group = Group {
        users: vec![user("ann", "Oslo"), user("bob", "")],
    };
    let messages = failure(group_schema().try_validate(&group, &ValidationConfig::default()));

    assert_eq!(messages.len(), 1);
    let message = messages.first();
    assert_eq!(message.root, "Group");
    assert_eq!(
        message.path.full_name(),
        "users[1]<collection element>.address.city"
    );
    assert_eq!(
        message.to_string(),
        "Group.users[1]<collection element>.address.city: must not be blank"
    );
}

#[test]
fn test_elements_accumulate_in_order() {
    let group = Group {
        users: vec![user("", "Oslo"), user("bob", " "), user("", "")],
    };
    let messages = failure(group_schema().try_validate(&group, &ValidationConfig::default()));

    let locations: Vec<String> = messages.iter().map(|m| m.location()).collect();
    assert_eq!(
        locations,
        vec![
            "Group.users[0]<collection element>.name",
            "Group.users[1]<collection element>.address.city",
            "Group.users[2]<collection element>.name",
            "Group.users[2]<collection element>.address.city",
        ]
    );
}

#[test]
fn test_empty_list_violates_non_empty() {
    let group = Group { users: Vec::new() };
    let messages = failure(group_schema().try_validate(&group, &ValidationConfig::default()));

    assert_eq!(messages.constraint_ids(), vec!["kova.collection.notEmpty"]);
    assert_eq!(messages.first().location(), "Group.users");
}

#[test]
fn test_size_bounds_on_sets() {
    let schema = Schema::of::<HashSet<u8>>().min_size(2).max_size(3);
    let config = ValidationConfig::default();

    let small: HashSet<u8> = [1].into_iter().collect();
    let messages = failure(schema.try_validate(&small, &config));
    assert_eq!(messages.first().text, "must have at least 2 elements");

    let fits: HashSet<u8> = [1, 2, 3].into_iter().collect();
    assert!(schema.try_validate(&fits, &config).unwrap().is_success());
}

#[test]
fn test_map_size_uses_map_messages() {
    let schema = Schema::map::<String, i32>().size(1);
    let messages = failure(schema.try_validate(&Default::default(), &ValidationConfig::default()));

    assert_eq!(messages.constraint_ids(), vec!["kova.map.length"]);
    assert_eq!(messages.first().text, "must have exactly 1 entries");
}

#[test]
fn test_map_entries_annotate_path() {
    let schema = Schema::of::<BTreeMap<String, i32>>()
        .on_each_key(Schema::string().max_len(3))
        .on_each_value(Schema::int().min(0));

    let mut scores = BTreeMap::new();
    scores.insert("amy".to_string(), -2);
    scores.insert("brian".to_string(), 4);

    let messages = failure(schema.try_validate(&scores, &ValidationConfig::default()));
    let locations: Vec<String> = messages.iter().map(|m| m.location()).collect();
    assert_eq!(locations, vec!["[brian]<map key>", "[amy]<map value>"]);
}

#[test]
fn test_index_map_keeps_insertion_order() {
    let schema = Schema::of::<IndexMap<&'static str, i32>>().on_each_value(Schema::int().lt(10));

    let mut limits = IndexMap::new();
    limits.insert("z", 11);
    limits.insert("a", 12);

    let messages = failure(schema.try_validate(&limits, &ValidationConfig::default()));
    let paths: Vec<String> = messages.iter().map(|m| m.path.full_name()).collect();
    assert_eq!(paths, vec!["[z]<map value>", "[a]<map value>"]);
}

#[test]
fn test_ensure_each_checks_every_element() {
    let schema = Schema::list::<String>().ensure_each("app.lowercase", |s: &String, _| {
        kova::ConstraintResult::satisfies(
            s.chars().all(|c| !c.is_uppercase()),
            "must be lowercase",
        )
    });

    let tags = vec!["ok".to_string(), "NO".to_string()];
    let messages = failure(schema.try_validate(&tags, &ValidationConfig::default()));
    assert_eq!(messages.constraint_ids(), vec!["app.lowercase"]);
    assert_eq!(messages.first().to_string(), "[1]<collection element>: must be lowercase");
}
