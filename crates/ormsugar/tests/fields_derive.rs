//! `#[derive(Fields)]` through the public API.

#![cfg(feature = "derive")]
#![allow(dead_code)]

use ormsugar::{Args, FactoryConfig, Fields, Q, QFactory};

#[derive(Fields)]
struct Tag {
    name: String,
}

#[derive(Fields)]
struct Profile {
    age: i32,
    favorite: Option<String>,
}

#[derive(Fields)]
struct User {
    username: String,
    #[sugar(rename = "mail")]
    email: String,
    #[sugar(related)]
    profile: Option<Profile>,
    #[sugar(related)]
    tags: Vec<Tag>,
    #[sugar(skip)]
    cache: Option<String>,
}

#[derive(Fields)]
#[sugar(rename_all = "camelCase", accessor = "LegacyQ")]
struct LegacyRow {
    birthday_date: String,
}

#[test]
fn plain_field_paths() {
    assert_eq!(User::fields().username().get_path(), "username");
    assert_eq!(User::fields().email().get_path(), "mail");
}

#[test]
fn related_fields_chain() {
    let q = User::fields().profile().age().gte(18);
    assert_eq!(q, Q::leaf("profile__age__gte", 18));
    assert_eq!(
        User::fields().profile().favorite().is_null(),
        Q::leaf("profile__favorite__isnull", true)
    );
}

#[test]
fn accessor_derefs_to_path() {
    let tags = User::fields().tags();
    assert_eq!(tags.get_path(), "tags");
    assert_eq!(tags.index(0).child("name").get_path(), "tags__0__name");
    assert_eq!(tags.name().icontains("rust"), Q::leaf("tags__name__icontains", "rust"));
}

#[test]
fn container_attributes() {
    let fields: LegacyQ = LegacyRow::fields();
    assert_eq!(fields.birthday_date().get_path(), "birthdayDate");
}

#[test]
fn fields_in_custom_factory() {
    let sugar = QFactory::with_config(FactoryConfig::new().without_builtin_lookups());
    let favorite = User::fields_in(&sugar).profile().favorite();
    assert!(favorite.factory().registry().is_empty());
    // No `is_null` handler: the call falls back to a keyword predicate.
    let q = favorite.child("is_null").call(Args::new().arg(true)).unwrap();
    assert_eq!(q, Q::leaf("profile__favorite__is_null", true));
}

#[derive(Fields)]
struct Document {
    path: String,
    into_path: String,
    title: String,
}

#[test]
fn field_named_path() {
    let fields = Document::fields();
    assert_eq!(fields.path().get_path(), "path");
    assert_eq!(fields.into_path().get_path(), "into_path");
    assert_eq!(fields.title().eq("x"), Q::leaf("title__exact", "x"));
    assert!(AsRef::<ormsugar::Path>::as_ref(&fields).is_root());
}

#[derive(Fields)]
struct Page<T: Fields> {
    #[sugar(related)]
    item: T,
    title: String,
}

#[derive(Fields)]
struct Snippet<'a> {
    body: &'a str,
}

#[test]
fn generic_models() {
    let q = Page::<Tag>::fields().item().name().eq("rust");
    assert_eq!(q, Q::leaf("item__name__exact", "rust"));
    assert_eq!(Page::<Tag>::fields().title().get_path(), "title");

    let nested = Page::<Page<Tag>>::fields().item().item().name();
    assert_eq!(nested.get_path(), "item__item__name");

    assert_eq!(Snippet::fields().body().get_path(), "body");
}

#[test]
fn accessor_clone_and_debug() {
    let fields = Page::<Tag>::fields().item();
    let copy = fields.clone();
    assert_eq!(format!("{copy:?}"), "TagFields(Path(\"item\"))");
}
