use super::*;
use crate::ast::{Arg, AstBuilder};
use crate::context::CheckGates;
use crate::test_fixtures::{check_all, checker, checker_with, kinds, ty};
use phz_common::{CheckerOptions, IssueKind};

fn messages(state: &CheckerState<'_>) -> Vec<String> {
    state
        .issues()
        .issues()
        .iter()
        .map(|issue| issue.message.clone())
        .collect()
}

// =============================================================================
// Instance calls
// =============================================================================

#[test]
fn nullable_receiver_reports_null_and_still_checks_the_object() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$a", ty("Animal|null"));
    let mut state = checker();
    let receiver = b.var("a");
    let one = b.int(1);
    let extra = b.string("x");
    let call = b.method_call(receiver, "bar", vec![one, extra]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(
        kinds(&state),
        [IssueKind::NullReference, IssueKind::TooManyArguments]
    );
    assert_eq!(
        messages(&state),
        [
            "Cannot call method bar on possibly null variable $a",
            "Too many arguments for method Animal::bar",
        ]
    );
    assert_eq!(state.expr_type(call.id), Some(&UnionType::int()));
}

#[test]
fn scalar_and_array_receivers_are_invalid() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$n", ty("int"));
    ctx.set_var("$names", ty("array<int, string>"));
    let mut state = checker();
    let n = b.var("n");
    let on_int = b.method_call(n, "speak", vec![]);
    let names = b.var("names");
    let on_array = b.method_call(names, "speak", vec![]);
    check_all(&mut state, &[on_int.clone(), on_array], &mut ctx).unwrap();
    assert_eq!(
        kinds(&state),
        [IssueKind::InvalidArgument, IssueKind::InvalidArgument]
    );
    assert_eq!(messages(&state)[0], "Cannot call method speak on int variable $n");
    assert_eq!(state.expr_type(on_int.id), Some(&UnionType::mixed()));
}

#[test]
fn mixed_receiver_is_a_mixed_method_call() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$any", UnionType::mixed());
    let mut state = checker();
    let any = b.var("any");
    let call = b.method_call(any, "speak", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::MixedMethodCall]);
}

#[test]
fn this_outside_a_class_is_invalid_scope() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    let mut state = checker();
    let this = b.this();
    let call = b.method_call(this, "speak", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(
        kinds(&state),
        [IssueKind::InvalidScope, IssueKind::MixedMethodCall]
    );
    assert_eq!(messages(&state)[0], "Use of $this in non-class context");
}

#[test]
fn this_inside_a_class_resolves_against_it() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::for_class("Dog", Some("Animal"));
    let mut state = checker();
    let this = b.this();
    let item = b.string("ball");
    let call = b.method_call(this, "fetch", vec![item]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(call.id), Some(&ty("string|null")));
}

#[test]
fn magic_mock_and_phantom_receivers_widen_to_mixed() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$magic", ty("Magic"));
    ctx.set_var("$dog", ty("Dog"));
    ctx.set_var("$cat", ty("Cat"));
    ctx.add_phantom_class("Cat");
    let mut state = checker_with(CheckerOptions::default().with_mock_class("Dog"));

    let magic = b.var("magic");
    let out = b.var("out");
    let on_magic = b.method_call(magic, "anything", vec![out]);
    let dog = b.var("dog");
    let on_mock = b.method_call(dog, "fetch", vec![]);
    let cat = b.var("cat");
    let on_phantom = b.method_call(cat, "purr", vec![]);
    check_all(
        &mut state,
        &[on_magic.clone(), on_mock.clone(), on_phantom.clone()],
        &mut ctx,
    )
    .unwrap();

    assert!(kinds(&state).is_empty());
    assert_eq!(ctx.var_type("$out"), Some(&UnionType::mixed()));
    for call in [&on_magic, &on_mock, &on_phantom] {
        assert_eq!(state.expr_type(call.id), Some(&UnionType::mixed()));
    }
}

#[test]
fn undefined_class_and_method_are_reported() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$horse", ty("Horse"));
    ctx.set_var("$dog", ty("Dog"));
    let mut state = checker();
    let horse = b.var("horse");
    let on_horse = b.method_call(horse, "gallop", vec![]);
    let dog = b.var("dog");
    let howl = b.method_call(dog, "howl", vec![]);
    check_all(&mut state, &[on_horse.clone(), howl], &mut ctx).unwrap();
    assert_eq!(
        kinds(&state),
        [IssueKind::UndefinedClass, IssueKind::UndefinedMethod]
    );
    assert_eq!(messages(&state)[1], "Method Dog::howl does not exist");
    assert_eq!(state.expr_type(on_horse.id), Some(&UnionType::mixed()));
}

#[test]
fn one_bad_member_does_not_hide_the_others() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$pet", ty("Dog|Cat"));
    let mut state = checker();
    let pet = b.var("pet");
    let one = b.int(1);
    let call = b.method_call(pet, "fetch", vec![one]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(
        kinds(&state),
        [IssueKind::UndefinedMethod, IssueKind::InvalidArgument]
    );
}

#[test]
fn method_checks_are_skipped_when_gated() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$dog", ty("Dog"));
    ctx.disable(CheckGates::METHODS);
    let mut state = checker();
    let dog = b.var("dog");
    let howl = b.method_call(dog, "howl", vec![]);
    state.check_expression(&howl, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(howl.id), Some(&UnionType::mixed()));
}

#[test]
fn dynamic_method_name_walks_arguments() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$dog", ty("Dog"));
    ctx.set_var("$name", ty("string"));
    let mut state = checker();
    let dog = b.var("dog");
    let name = b.var("name");
    let ghost = b.var("ghost");
    let call = b.method_call_with(
        dog,
        MemberName::Dynamic(Box::new(name)),
        vec![Arg::new(ghost)],
    );
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(ctx.var_type("$ghost"), Some(&UnionType::mixed()));
}

#[test]
fn private_methods_are_only_visible_to_their_class() {
    let mut b = AstBuilder::new();
    let mut state = checker();

    let mut ctx = Context::for_class("Dog", Some("Animal"));
    ctx.set_var("$animal", ty("Animal"));
    let animal = b.var("animal");
    let call = b.method_call(animal, "secret", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InaccessibleMethod]);
    assert_eq!(
        messages(&state),
        ["Cannot access private method Animal::secret from context Dog"]
    );
    assert_eq!(state.expr_type(call.id), Some(&UnionType::int()));

    let mut state = checker();
    let mut ctx = Context::for_class("Animal", None);
    ctx.set_var("$animal", ty("Animal"));
    let animal = b.var("animal");
    let call = b.method_call(animal, "secret", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
}

#[test]
fn protected_methods_are_visible_within_the_hierarchy() {
    let mut b = AstBuilder::new();
    let mut state = checker();

    let mut ctx = Context::for_class("Puppy", Some("Dog"));
    ctx.set_var("$animal", ty("Animal"));
    let animal = b.var("animal");
    let call = b.method_call(animal, "groom", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());

    let mut ctx = Context::new();
    ctx.set_var("$animal", ty("Animal"));
    let animal = b.var("animal");
    let call = b.method_call(animal, "groom", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InaccessibleMethod]);
    assert_eq!(
        messages(&state),
        ["Cannot access protected method Animal::groom from context global"]
    );
}

#[test]
fn deprecated_methods_are_reported() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$cat", ty("Cat"));
    let mut state = checker();
    let cat = b.var("cat");
    let call = b.method_call(cat, "legacy", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::DeprecatedMethod]);
    assert_eq!(
        messages(&state),
        ["The method Animal::legacy has been marked as deprecated"]
    );
}

#[test]
fn static_and_this_returns_are_the_receiver_class() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$dog", ty("Dog"));
    ctx.set_var("$stray", ty("Animal"));
    let mut state = checker();
    let dog = b.var("dog");
    let stray = b.var("stray");
    let adopt = b.method_call(dog, "adopt", vec![stray]);
    let dog = b.var("dog");
    let me = b.method_call(dog, "me", vec![]);
    let dog = b.var("dog");
    let ancestor = b.method_call(dog, "ancestor", vec![]);
    check_all(&mut state, &[adopt.clone(), me.clone(), ancestor.clone()], &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(adopt.id), Some(&ty("Dog")));
    assert_eq!(state.expr_type(me.id), Some(&ty("Dog")));
    assert_eq!(state.expr_type(ancestor.id), Some(&ty("Animal")));
}

#[test]
fn subclass_argument_to_an_ancestor_param_is_a_coercion() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$dog", ty("Dog"));
    ctx.set_var("$cat", ty("Cat"));
    let mut state = checker();
    let dog = b.var("dog");
    let cat = b.var("cat");
    let adopt = b.method_call(dog, "adopt", vec![cat]);
    check_all(&mut state, &[adopt.clone()], &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::TypeCoercion]);
    assert_eq!(state.expr_type(adopt.id), Some(&ty("Dog")));
}

#[test]
fn parent_return_without_a_parent_is_invalid_scope() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$animal", ty("Animal"));
    let mut state = checker();
    let animal = b.var("animal");
    let call = b.method_call(animal, "ancestor", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InvalidScope]);
    assert_eq!(state.expr_type(call.id), Some(&UnionType::mixed()));
}

#[test]
fn self_placeholder_receiver_needs_a_class() {
    let mut b = AstBuilder::new();
    let mut state = checker();

    let mut ctx = Context::for_class("Widget", None);
    ctx.set_var("$me", ty("self"));
    let me = b.var("me");
    let call = b.method_call(me, "render", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(call.id), Some(&UnionType::string()));

    let mut ctx = Context::new();
    ctx.set_var("$me", ty("self"));
    let me = b.var("me");
    let call = b.method_call(me, "render", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InvalidScope]);
}

// =============================================================================
// Static calls
// =============================================================================

#[test]
fn static_factory_returns_the_named_class() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    let mut state = checker();
    let animal = b.static_call(ClassRef::Named("Animal".into()), "create", vec![]);
    let dog = b.static_call(ClassRef::Named("Dog".into()), "create", vec![]);
    let widget = b.static_call(ClassRef::Named("Widget".into()), "build", vec![]);
    check_all(&mut state, &[animal.clone(), dog.clone(), widget.clone()], &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(animal.id), Some(&ty("Animal")));
    assert_eq!(state.expr_type(dog.id), Some(&ty("Dog")));
    assert_eq!(state.expr_type(widget.id), Some(&ty("Widget")));
}

#[test]
fn dynamic_class_is_never_reported() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    let mut state = checker();
    let class = b.var("class");
    let call = b.static_call(ClassRef::Dynamic(Box::new(class)), "anything", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(call.id), Some(&UnionType::mixed()));
}

#[test]
fn parent_call_without_a_parent_is_reported() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::for_class("Widget", None);
    let mut state = checker();
    let call = b.static_call(ClassRef::ParentRef, "render", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::ParentNotFound]);
    assert_eq!(state.expr_type(call.id), Some(&UnionType::mixed()));
}

#[test]
fn parent_call_resolves_against_the_calling_class() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::for_class("Dog", Some("Animal"));
    let mut state = checker();
    let speak = b.static_call(ClassRef::ParentRef, "speak", vec![]);
    let me = b.static_call(ClassRef::ParentRef, "me", vec![]);
    check_all(&mut state, &[speak.clone(), me.clone()], &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
    assert_eq!(state.expr_type(speak.id), Some(&UnionType::string()));
    assert_eq!(state.expr_type(me.id), Some(&ty("Dog")));
}

#[test]
fn instance_method_called_statically_from_an_unrelated_class() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::for_class("Widget", None);
    let mut state = checker();
    let call = b.static_call(ClassRef::Named("Animal".into()), "speak", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InvalidStaticInvocation]);
    assert_eq!(messages(&state), ["Method Animal::speak is not static"]);
}

#[test]
fn instance_method_called_statically_from_a_subclass_is_allowed() {
    let mut b = AstBuilder::new();
    let mut state = checker();

    let mut ctx = Context::for_class("Dog", Some("Animal"));
    let call = b.static_call(ClassRef::Named("Animal".into()), "speak", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());

    let mut ctx = Context::new();
    let call = b.static_call(ClassRef::Named("Animal".into()), "speak", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert!(kinds(&state).is_empty());
}

#[test]
fn static_context_cannot_call_its_own_instance_methods() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::for_class("Animal", None).with_static(true);
    let mut state = checker();
    let call = b.static_call(ClassRef::SelfRef, "speak", vec![]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InvalidStaticInvocation]);
}

#[test]
fn magic_static_and_unknown_targets() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    let mut state = checker();
    let out = b.var("out");
    let magic = b.static_call(ClassRef::Named("StaticMagic".into()), "anything", vec![out]);
    let horse = b.static_call(ClassRef::Named("Horse".into()), "make", vec![]);
    let missing = b.static_call(ClassRef::Named("Animal".into()), "nope", vec![]);
    check_all(&mut state, &[magic.clone(), horse, missing.clone()], &mut ctx).unwrap();
    assert_eq!(
        kinds(&state),
        [IssueKind::UndefinedClass, IssueKind::UndefinedMethod]
    );
    assert_eq!(ctx.var_type("$out"), Some(&UnionType::mixed()));
    assert_eq!(state.expr_type(magic.id), Some(&UnionType::mixed()));
    assert_eq!(state.expr_type(missing.id), Some(&UnionType::mixed()));
}

#[test]
fn static_checks_follow_the_gates() {
    let mut b = AstBuilder::new();
    let mut state = checker();

    let mut ctx = Context::new();
    ctx.disable(CheckGates::CLASSES);
    let horse = b.static_call(ClassRef::Named("Horse".into()), "make", vec![]);
    state.check_expression(&horse, &mut ctx).unwrap();

    let mut ctx = Context::new();
    ctx.disable(CheckGates::METHODS);
    let missing = b.static_call(ClassRef::Named("Animal".into()), "nope", vec![]);
    state.check_expression(&missing, &mut ctx).unwrap();

    assert!(kinds(&state).is_empty());
}

#[test]
fn static_call_arguments_are_checked() {
    let mut b = AstBuilder::new();
    let mut ctx = Context::for_class("Dog", Some("Animal"));
    let mut state = checker();
    let half = b.float(0.5);
    let call = b.static_call(ClassRef::ParentRef, "bar", vec![half]);
    state.check_expression(&call, &mut ctx).unwrap();
    assert_eq!(kinds(&state), [IssueKind::InvalidScalarArgument]);
}
