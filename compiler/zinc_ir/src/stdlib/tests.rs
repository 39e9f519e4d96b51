use super::*;
use crate::FnMatch;

#[test]
fn test_every_declaration_resolves_to_itself() {
    let mut model = Model::new();
    declare(&mut model);
    for decl in declarations() {
        let name = model.interner().intern(decl.name);
        match model.match_fn(name, decl.params) {
            FnMatch::Unique(id) => assert_eq!(model.function(id).params, decl.params),
            other => panic!("{} did not resolve uniquely: {other:?}", decl.name),
        }
    }
}

#[test]
fn test_array_nd_has_three_flavours() {
    let count = declarations().filter(|d| d.name == "array2d").count();
    assert_eq!(count, 3);
}

#[test]
fn test_index_set_family_is_complete() {
    let count = declarations()
        .filter(|d| d.name.starts_with("index_set"))
        .count();
    // 1 + 2 + 3 + 4 + 5 + 6
    assert_eq!(count, 21);
}
